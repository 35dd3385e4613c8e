use tracing::info;

use crate::context::AppContext;
use crate::domain::completion::CompletionResult;
use crate::domain::message::IncomingMessage;
use crate::domain::project::{extract_project_tag, resolve_project_key};
use crate::domain::ticket::{Ticket, TicketDraft};
use crate::error::AppResult;
use crate::workflow::prompt::{SYSTEM_INSTRUCTION, build_prompt};

const SUMMARY_PREFIX: &str = "[BOT]";
const FALLBACK_TITLE_CHARS: usize = 80;
// Jira caps the single-line summary field at 255 characters.
const MAX_SUMMARY_CHARS: usize = 255;

/// Runs extract, complete, parse and submit for one fetched message.
pub async fn create_ticket_from_message(
    ctx: &AppContext,
    message: &IncomingMessage,
) -> AppResult<Ticket> {
    let (tag, clean_content) = extract_project_tag(&message.content);
    if tag.is_none() {
        info!(message_id = %message.id, "no project tag found, using default project");
    }
    let project_key = resolve_project_key(tag, &ctx.config.default_project_key);

    let prompt = build_prompt(&clean_content, &ctx.config.response_language);
    let completion = ctx
        .language_model
        .complete(SYSTEM_INSTRUCTION, &prompt)
        .await?;
    let parsed = ctx.config.parse_strategy.parse(&completion)?;

    info!(
        project_key = %project_key,
        title = %parsed.title,
        "drafted ticket from message"
    );

    let draft = build_draft(project_key, &clean_content, &parsed, &message.permalink);
    ctx.issue_tracker.create_ticket(&draft).await
}

fn build_draft(
    project_key: String,
    clean_content: &str,
    parsed: &CompletionResult,
    permalink: &str,
) -> TicketDraft {
    let title = if parsed.title.is_empty() {
        single_line(clean_content)
            .chars()
            .take(FALLBACK_TITLE_CHARS)
            .collect::<String>()
    } else {
        single_line(&parsed.title)
    };
    let summary = format!("{SUMMARY_PREFIX} {title}")
        .chars()
        .take(MAX_SUMMARY_CHARS)
        .collect::<String>();

    TicketDraft {
        project_key,
        summary: summary.trim_end().to_string(),
        description: format!(
            "{}\n\n{}\n\n🔗 View message in chat: {permalink}",
            parsed.context, parsed.summary
        ),
    }
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::infra::jira::JiraClient;
    use crate::infra::openai::OpenAiClient;
    use crate::test_support::{CallLog, FakeChat, config_with, message};

    fn parsed(title: &str) -> CompletionResult {
        CompletionResult {
            title: title.to_string(),
            context: "Inactive users hit the login endpoint.".to_string(),
            summary: "Return 403 instead of 401.".to_string(),
        }
    }

    #[test]
    fn builds_bot_summary_and_linked_description() {
        let draft = build_draft(
            "CP".to_string(),
            "Login returns 401",
            &parsed("Login fails for inactive users"),
            "https://discord.com/channels/1/2/3",
        );
        assert_eq!(draft.project_key, "CP");
        assert_eq!(draft.summary, "[BOT] Login fails for inactive users");
        assert_eq!(
            draft.description,
            "Inactive users hit the login endpoint.\n\nReturn 403 instead of 401.\n\n🔗 View message in chat: https://discord.com/channels/1/2/3"
        );
    }

    #[test]
    fn falls_back_to_message_text_for_empty_title() {
        let draft = build_draft("CP".to_string(), "  Login returns 401  ", &parsed(""), "link");
        assert_eq!(draft.summary, "[BOT] Login returns 401");
    }

    #[test]
    fn fallback_title_stays_on_one_line() {
        let draft = build_draft(
            "CP".to_string(),
            "first line\nsecond line",
            &CompletionResult::default(),
            "link",
        );
        assert_eq!(draft.summary, "[BOT] first line second line");
    }

    #[test]
    fn long_titles_are_capped_for_jira() {
        let draft = build_draft("CP".to_string(), "text", &parsed(&"title ".repeat(100)), "link");
        assert_eq!(draft.summary.chars().count(), 255);
        assert!(draft.summary.starts_with("[BOT] title title"));
        assert!(!draft.summary.contains('\n'));
    }

    #[tokio::test]
    async fn tagged_message_becomes_ticket_in_its_project() {
        let server = MockServer::start();
        let completion = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .body_includes("Login returns 401 for inactive users");
            then.status(200).json_body(json!({
                "choices": [{"message": {"content": "Title:\nInactive login\nContext:\nUsers are inactive.\nSummary:\nReturn 403."}}]
            }));
        });
        let issue = server.mock(|when, then| {
            when.method(POST).path("/rest/api/3/issue").json_body_includes(
                json!({
                    "fields": {
                        "project": {"key": "CP"},
                        "summary": "[BOT] Inactive login"
                    }
                })
                .to_string(),
            );
            then.status(201).json_body(json!({"key": "CP-12"}));
        });

        let openai_base = format!("{}/v1", server.base_url());
        let config = config_with(&[
            ("OPENAI_BASE_URL", openai_base.as_str()),
            ("JIRA_BASE_URL", server.base_url().as_str()),
        ]);
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let ctx = AppContext::new(
            config.clone(),
            Arc::new(FakeChat::with_message(log, "unused")),
            Arc::new(JiraClient::new(&config).unwrap()),
            Arc::new(OpenAiClient::new(&config).unwrap()),
        );

        let ticket = create_ticket_from_message(
            &ctx,
            &message("[CP] Login returns 401 for inactive users"),
        )
        .await
        .unwrap();

        completion.assert();
        issue.assert();
        assert_eq!(ticket.url, format!("{}/browse/CP-12", server.base_url()));
    }
}
