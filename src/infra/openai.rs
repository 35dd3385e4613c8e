use async_trait::async_trait;
use reqwest::{
    Client,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::services::LanguageModelService;

const TEMPERATURE: f32 = 0.5;

pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
        })
    }

    fn completions_endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LanguageModelService for OpenAiClient {
    async fn complete(&self, system: &str, prompt: &str) -> AppResult<String> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
        };

        debug!(model = %self.model, "requesting completion");
        let response = self
            .http
            .post(self.completions_endpoint())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|err| AppError::LanguageModel(format!("failed to call OpenAI: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            error!(%status, body = %body, "completion request failed");
            return Err(AppError::LanguageModel(format!(
                "OpenAI responded with {status}: {body}"
            )));
        }

        let payload: ChatCompletionResponse = response.json().await.map_err(|err| {
            AppError::LanguageModel(format!("failed to parse OpenAI response: {err}"))
        })?;

        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| AppError::LanguageModel("completion contained no message".to_string()))
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
