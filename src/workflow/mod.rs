pub mod prompt;
pub mod reaction;
pub mod ticket;
