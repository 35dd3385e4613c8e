use async_trait::async_trait;

use crate::domain::message::{Channel, IncomingMessage};
use crate::error::AppResult;

#[async_trait]
pub trait ChatService: Send + Sync {
    async fn resolve_channel(&self, channel_id: &str) -> AppResult<Channel>;
    async fn fetch_message(&self, channel: &Channel, message_id: &str)
    -> AppResult<IncomingMessage>;
    async fn reply(&self, message: &IncomingMessage, content: &str) -> AppResult<()>;
}
