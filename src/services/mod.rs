pub mod chat;
pub mod issue_tracker;
pub mod language_model;

pub use chat::ChatService;
pub use issue_tracker::IssueTrackerService;
pub use language_model::LanguageModelService;
