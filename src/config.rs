use std::env;
use std::time::Duration;

use crate::domain::completion::ParseStrategy;
use crate::domain::ticket::DescriptionFormat;
use crate::error::{AppError, AppResult};

pub const DEFAULT_DISCORD_API_BASE: &str = "https://discord.com/api/v10";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ISSUE_TYPE: &str = "Task";
pub const DEFAULT_RESPONSE_LANGUAGE: &str = "English";
pub const DEFAULT_TRIGGER_EMOJI: &str = "📌";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Process configuration, read once at startup and shared read-only by every
/// handler invocation.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub discord_token: String,
    pub discord_api_base: String,
    pub jira_base_url: String,
    pub jira_email: String,
    pub jira_token: String,
    pub jira_issue_type: String,
    pub default_project_key: String,
    pub description_format: DescriptionFormat,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub parse_strategy: ParseStrategy,
    pub response_language: String,
    pub trigger_emoji: String,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let required = |name: &str| {
            optional(name).ok_or_else(|| AppError::Configuration(format!("{name} is not set")))
        };

        let parse_strategy = match optional("PINBOT_PARSE_STRATEGY") {
            Some(value) => ParseStrategy::from_str(&value).ok_or_else(|| {
                AppError::Configuration(format!("unknown parse strategy '{value}'"))
            })?,
            None => ParseStrategy::HeaderScan,
        };

        let description_format = match optional("JIRA_DESCRIPTION_FORMAT") {
            Some(value) => DescriptionFormat::from_str(&value).ok_or_else(|| {
                AppError::Configuration(format!("unknown description format '{value}'"))
            })?,
            None => DescriptionFormat::Document,
        };

        let http_timeout = match optional("PINBOT_HTTP_TIMEOUT_SECS") {
            Some(value) => {
                let secs = value.parse::<u64>().map_err(|err| {
                    AppError::Configuration(format!("invalid PINBOT_HTTP_TIMEOUT_SECS: {err}"))
                })?;
                if secs == 0 {
                    return Err(AppError::Configuration(
                        "PINBOT_HTTP_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            discord_token: required("DISCORD_TOKEN")?,
            discord_api_base: optional("DISCORD_API_BASE")
                .unwrap_or_else(|| DEFAULT_DISCORD_API_BASE.to_string()),
            jira_base_url: required("JIRA_BASE_URL")?,
            jira_email: required("JIRA_EMAIL")?,
            jira_token: required("JIRA_TOKEN")?,
            jira_issue_type: optional("JIRA_ISSUE_TYPE")
                .unwrap_or_else(|| DEFAULT_ISSUE_TYPE.to_string()),
            default_project_key: required("JIRA_PROJECT_KEY")?,
            description_format,
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_base_url: optional("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_model: optional("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            parse_strategy,
            response_language: optional("PINBOT_RESPONSE_LANGUAGE")
                .unwrap_or_else(|| DEFAULT_RESPONSE_LANGUAGE.to_string()),
            trigger_emoji: optional("PINBOT_TRIGGER_EMOJI")
                .unwrap_or_else(|| DEFAULT_TRIGGER_EMOJI.to_string()),
            http_timeout,
        })
    }
}
