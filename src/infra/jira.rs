use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::AppConfig;
use crate::domain::ticket::{DescriptionFormat, Ticket, TicketDraft};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

pub struct JiraClient {
    http: Client,
    base_url: String,
    email: String,
    token: String,
    issue_type: String,
    description_format: DescriptionFormat,
}

impl JiraClient {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url: config.jira_base_url.trim_end_matches('/').to_string(),
            email: config.jira_email.clone(),
            token: config.jira_token.clone(),
            issue_type: config.jira_issue_type.clone(),
            description_format: config.description_format,
        })
    }

    fn auth_header(email: &str, token: &str) -> String {
        let credentials = format!("{email}:{token}");
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    fn issue_endpoint(base_url: &str) -> String {
        format!("{base_url}/rest/api/3/issue")
    }

    fn browse_url(base_url: &str, key: &str) -> String {
        format!("{base_url}/browse/{key}")
    }
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    async fn create_ticket(&self, draft: &TicketDraft) -> AppResult<Ticket> {
        let project_key = draft.project_key.trim();
        if project_key.is_empty() {
            return Err(AppError::IssueTracker(
                "project key must not be empty".to_string(),
            ));
        }

        info!(project_key, "sending ticket to Jira");
        let request_body = JiraCreateIssueRequest::new(
            project_key,
            &self.issue_type,
            &draft.summary,
            &draft.description,
            self.description_format,
        );

        let response = self
            .http
            .post(Self::issue_endpoint(&self.base_url))
            .header(AUTHORIZATION, Self::auth_header(&self.email, &self.token))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|err| AppError::IssueTracker(format!("failed to call Jira: {err}")))?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            error!(project_key, %status, body = %body, "Jira rejected the ticket");
            return Err(AppError::IssueTracker(format!(
                "Jira responded with {status}: {body}"
            )));
        }

        let payload: JiraCreateIssueResponse = response.json().await.map_err(|err| {
            AppError::IssueTracker(format!("failed to parse Jira response: {err}"))
        })?;

        let url = Self::browse_url(&self.base_url, &payload.key);
        info!(project_key, key = %payload.key, %url, "ticket created in Jira");

        Ok(Ticket {
            key: payload.key,
            url,
        })
    }
}

#[derive(Serialize)]
struct JiraCreateIssueRequest {
    fields: JiraCreateIssueFields,
}

impl JiraCreateIssueRequest {
    fn new(
        project_key: &str,
        issue_type: &str,
        summary: &str,
        description: &str,
        format: DescriptionFormat,
    ) -> Self {
        let description = match format {
            DescriptionFormat::Document => {
                JiraDescription::Document(JiraDocument::single_paragraph(description))
            }
            DescriptionFormat::Plain => JiraDescription::Plain(description.to_string()),
        };
        Self {
            fields: JiraCreateIssueFields {
                project: JiraProject {
                    key: project_key.to_string(),
                },
                summary: summary.to_string(),
                description,
                issuetype: JiraIssueType {
                    name: issue_type.to_string(),
                },
            },
        }
    }
}

#[derive(Serialize)]
struct JiraCreateIssueFields {
    project: JiraProject,
    summary: String,
    description: JiraDescription,
    issuetype: JiraIssueType,
}

#[derive(Serialize)]
struct JiraProject {
    key: String,
}

#[derive(Serialize)]
struct JiraIssueType {
    name: String,
}

#[derive(Serialize)]
#[serde(untagged)]
enum JiraDescription {
    Plain(String),
    Document(JiraDocument),
}

#[derive(Serialize)]
struct JiraDocument {
    #[serde(rename = "type")]
    doc_type: &'static str,
    version: u8,
    content: Vec<JiraDocNode>,
}

impl JiraDocument {
    fn single_paragraph(text: &str) -> Self {
        Self {
            doc_type: "doc",
            version: 1,
            content: vec![JiraDocNode::paragraph(text.to_string())],
        }
    }
}

#[derive(Serialize)]
struct JiraDocNode {
    #[serde(rename = "type")]
    node_type: &'static str,
    content: Vec<JiraDocText>,
}

impl JiraDocNode {
    fn paragraph(text: String) -> Self {
        Self {
            node_type: "paragraph",
            content: vec![JiraDocText::text(text)],
        }
    }
}

#[derive(Serialize)]
struct JiraDocText {
    #[serde(rename = "type")]
    text_type: &'static str,
    text: String,
}

impl JiraDocText {
    fn text(text: String) -> Self {
        Self {
            text_type: "text",
            text,
        }
    }
}

#[derive(Deserialize)]
struct JiraCreateIssueResponse {
    key: String,
}
