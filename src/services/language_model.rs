use async_trait::async_trait;

use crate::error::AppResult;

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    /// Sends one chat completion request and returns the trimmed text of the
    /// first choice.
    async fn complete(&self, system: &str, prompt: &str) -> AppResult<String>;
}
