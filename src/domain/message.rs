use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A reaction-added event as delivered by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReactionEvent {
    pub emoji: String,
    pub message_id: String,
    pub channel_id: String,
    pub user_id: String,
    #[serde(default)]
    pub guild_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub guild_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub id: String,
    pub channel_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub permalink: String,
}

impl IncomingMessage {
    pub fn preview(&self) -> String {
        self.content.chars().take(100).collect()
    }
}

pub fn message_permalink(guild_id: Option<&str>, channel_id: &str, message_id: &str) -> String {
    let guild = guild_id.unwrap_or("@me");
    format!("https://discord.com/channels/{guild}/{channel_id}/{message_id}")
}
