use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("chat error: {0}")]
    Chat(String),
    #[error("channel {0} not found")]
    ChannelNotFound(String),
    #[error("issue tracker error: {0}")]
    IssueTracker(String),
    #[error("language model error: {0}")]
    LanguageModel(String),
    #[error("completion parse error: {0}")]
    Parse(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
