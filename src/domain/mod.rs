pub mod completion;
pub mod message;
pub mod project;
pub mod ticket;
