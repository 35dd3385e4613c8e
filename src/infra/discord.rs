use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, StatusCode, header::AUTHORIZATION};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::AppConfig;
use crate::domain::message::{Channel, IncomingMessage, message_permalink};
use crate::error::{AppError, AppResult};
use crate::services::ChatService;

/// Discord REST client covering the calls the reaction handler makes. The
/// gateway session that produces reaction events lives outside this crate.
pub struct DiscordClient {
    http: Client,
    api_base: String,
    token: String,
}

impl DiscordClient {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            api_base: config.discord_api_base.trim_end_matches('/').to_string(),
            token: config.discord_token.clone(),
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, format!("Bot {}", self.token))
    }

    async fn error_body(response: reqwest::Response) -> String {
        response
            .text()
            .await
            .unwrap_or_else(|_| "<unable to read response>".to_string())
    }
}

#[async_trait]
impl ChatService for DiscordClient {
    async fn resolve_channel(&self, channel_id: &str) -> AppResult<Channel> {
        let url = format!("{}/channels/{channel_id}", self.api_base);
        let response = self
            .authorized(self.http.get(url))
            .send()
            .await
            .map_err(|err| AppError::Chat(format!("failed to call Discord: {err}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::ChannelNotFound(channel_id.to_string()));
        }
        if !status.is_success() {
            let body = Self::error_body(response).await;
            return Err(AppError::Chat(format!(
                "Discord responded with {status} for channel {channel_id}: {body}"
            )));
        }

        let payload: DiscordChannel = response
            .json()
            .await
            .map_err(|err| AppError::Chat(format!("failed to parse Discord channel: {err}")))?;
        Ok(Channel {
            id: payload.id,
            guild_id: payload.guild_id,
        })
    }

    async fn fetch_message(
        &self,
        channel: &Channel,
        message_id: &str,
    ) -> AppResult<IncomingMessage> {
        let url = format!(
            "{}/channels/{}/messages/{message_id}",
            self.api_base, channel.id
        );
        let response = self
            .authorized(self.http.get(url))
            .send()
            .await
            .map_err(|err| AppError::Chat(format!("failed to call Discord: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = Self::error_body(response).await;
            return Err(AppError::Chat(format!(
                "Discord responded with {status} for message {message_id}: {body}"
            )));
        }

        let payload: DiscordMessage = response
            .json()
            .await
            .map_err(|err| AppError::Chat(format!("failed to parse Discord message: {err}")))?;
        Ok(IncomingMessage {
            permalink: message_permalink(channel.guild_id.as_deref(), &channel.id, &payload.id),
            id: payload.id,
            channel_id: channel.id.clone(),
            author_id: payload.author.id,
            content: payload.content,
            created_at: payload.timestamp,
        })
    }

    async fn reply(&self, message: &IncomingMessage, content: &str) -> AppResult<()> {
        let url = format!("{}/channels/{}/messages", self.api_base, message.channel_id);
        let body = DiscordCreateMessage {
            content,
            message_reference: DiscordMessageReference {
                message_id: &message.id,
                fail_if_not_exists: false,
            },
        };
        let response = self
            .authorized(self.http.post(url))
            .json(&body)
            .send()
            .await
            .map_err(|err| AppError::Chat(format!("failed to call Discord: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = Self::error_body(response).await;
            warn!(%status, channel_id = %message.channel_id, "Discord rejected the reply");
            return Err(AppError::Chat(format!(
                "Discord responded with {status} when replying: {body}"
            )));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct DiscordChannel {
    id: String,
    #[serde(default)]
    guild_id: Option<String>,
}

#[derive(Deserialize)]
struct DiscordMessage {
    id: String,
    #[serde(default)]
    content: String,
    author: DiscordUser,
    timestamp: DateTime<Utc>,
}

#[derive(Deserialize)]
struct DiscordUser {
    id: String,
}

#[derive(Serialize)]
struct DiscordCreateMessage<'a> {
    content: &'a str,
    message_reference: DiscordMessageReference<'a>,
}

#[derive(Serialize)]
struct DiscordMessageReference<'a> {
    message_id: &'a str,
    fail_if_not_exists: bool,
}
