use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tracing::subscriber::DefaultGuard;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::message::{Channel, IncomingMessage, message_permalink};
use crate::domain::ticket::{Ticket, TicketDraft};
use crate::error::{AppError, AppResult};
use crate::services::{ChatService, IssueTrackerService, LanguageModelService};

pub fn config_with(overrides: &[(&str, &str)]) -> AppConfig {
    let mut vars: HashMap<String, String> = [
        ("DISCORD_TOKEN", "discord-token"),
        ("JIRA_BASE_URL", "https://x.atlassian.net"),
        ("JIRA_EMAIL", "bot@example.com"),
        ("JIRA_TOKEN", "jira-token"),
        ("JIRA_PROJECT_KEY", "BA20"),
        ("OPENAI_API_KEY", "sk-test"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect();
    for (name, value) in overrides {
        vars.insert(name.to_string(), value.to_string());
    }
    AppConfig::from_lookup(|name| vars.get(name).cloned()).expect("test config is valid")
}

pub type CallLog = Arc<Mutex<Vec<&'static str>>>;

pub fn message(content: &str) -> IncomingMessage {
    IncomingMessage {
        id: "10".to_string(),
        channel_id: "20".to_string(),
        author_id: "30".to_string(),
        content: content.to_string(),
        created_at: Utc::now(),
        permalink: message_permalink(Some("1"), "20", "10"),
    }
}

pub struct FakeChat {
    pub log: CallLog,
    pub channel_exists: bool,
    pub message: Option<IncomingMessage>,
    pub replies: Mutex<Vec<String>>,
}

impl FakeChat {
    pub fn with_message(log: CallLog, content: &str) -> Self {
        Self {
            log,
            channel_exists: true,
            message: Some(message(content)),
            replies: Mutex::new(Vec::new()),
        }
    }

    pub fn replies(&self) -> Vec<String> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatService for FakeChat {
    async fn resolve_channel(&self, channel_id: &str) -> AppResult<Channel> {
        self.log.lock().unwrap().push("resolve_channel");
        if !self.channel_exists {
            return Err(AppError::ChannelNotFound(channel_id.to_string()));
        }
        Ok(Channel {
            id: channel_id.to_string(),
            guild_id: Some("1".to_string()),
        })
    }

    async fn fetch_message(
        &self,
        _channel: &Channel,
        message_id: &str,
    ) -> AppResult<IncomingMessage> {
        self.log.lock().unwrap().push("fetch_message");
        self.message
            .clone()
            .ok_or_else(|| AppError::Chat(format!("Unknown Message {message_id}")))
    }

    async fn reply(&self, _message: &IncomingMessage, content: &str) -> AppResult<()> {
        self.log.lock().unwrap().push("reply");
        self.replies.lock().unwrap().push(content.to_string());
        Ok(())
    }
}

pub struct FakeLanguageModel {
    pub log: CallLog,
    pub response: Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeLanguageModel {
    pub fn replying(log: CallLog, response: &str) -> Self {
        Self {
            log,
            response: Ok(response.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(log: CallLog, reason: &str) -> Self {
        Self {
            log,
            response: Err(reason.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LanguageModelService for FakeLanguageModel {
    async fn complete(&self, _system: &str, prompt: &str) -> AppResult<String> {
        self.log.lock().unwrap().push("complete");
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.response.clone().map_err(AppError::LanguageModel)
    }
}

pub struct FakeIssueTracker {
    pub log: CallLog,
    pub reject: bool,
    pub drafts: Mutex<Vec<TicketDraft>>,
}

impl FakeIssueTracker {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            reject: false,
            drafts: Mutex::new(Vec::new()),
        }
    }

    pub fn drafts(&self) -> Vec<TicketDraft> {
        self.drafts.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueTrackerService for FakeIssueTracker {
    async fn create_ticket(&self, draft: &TicketDraft) -> AppResult<Ticket> {
        self.log.lock().unwrap().push("create_ticket");
        self.drafts.lock().unwrap().push(draft.clone());
        if self.reject {
            return Err(AppError::IssueTracker(
                "Jira responded with 400 Bad Request".to_string(),
            ));
        }
        let key = format!("{}-7", draft.project_key);
        Ok(Ticket {
            url: format!("https://x.atlassian.net/browse/{key}"),
            key,
        })
    }
}

pub fn context(
    config: AppConfig,
    chat: Arc<FakeChat>,
    language_model: Arc<FakeLanguageModel>,
    issue_tracker: Arc<FakeIssueTracker>,
) -> AppContext {
    AppContext::new(config, chat, issue_tracker, language_model)
}

/// Log output captured from the current thread while the guard is alive.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}
