use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{ChatService, IssueTrackerService, LanguageModelService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub chat: Arc<dyn ChatService>,
    pub issue_tracker: Arc<dyn IssueTrackerService>,
    pub language_model: Arc<dyn LanguageModelService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        chat: Arc<dyn ChatService>,
        issue_tracker: Arc<dyn IssueTrackerService>,
        language_model: Arc<dyn LanguageModelService>,
    ) -> Self {
        Self {
            config,
            chat,
            issue_tracker,
            language_model,
        }
    }
}
