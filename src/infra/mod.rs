pub mod discord;
pub mod jira;
pub mod openai;
