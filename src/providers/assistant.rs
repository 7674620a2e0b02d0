//! Travel assistant backed by the OpenAI chat completions API
//!
//! Each question is sent on its own: the system instruction plus the latest
//! user message. Earlier turns are not replayed.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::credentials::Credentials;
use super::{error_from_response, Provider, ProviderError};
use crate::config::AssistantConfig;

/// Reply used when the model returns no content
pub const EMPTY_REPLY: &str =
    "I apologize, but I couldn't generate a response. Please try again.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatTurn<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatTurn<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI chat completions client
#[derive(Debug, Clone)]
pub struct AssistantClient {
    http: reqwest::Client,
    base_url: String,
    settings: AssistantConfig,
    credentials: Credentials,
}

impl AssistantClient {
    pub fn new(http: reqwest::Client, config: &AssistantConfig, credentials: Credentials) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            settings: config.clone(),
            credentials,
        }
    }

    /// Whether a key is available; checked before anything is sent
    pub fn ensure_configured(&self) -> Result<(), ProviderError> {
        self.credentials.key(Provider::Assistant).map(|_| ())
    }

    /// Ask one question and return the generated reply
    pub async fn reply(&self, question: &str) -> Result<String, ProviderError> {
        let key = self.credentials.key(Provider::Assistant)?;
        let start = Instant::now();
        let url = format!("{}/v1/chat/completions", self.base_url);

        let request = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatTurn {
                    role: "system",
                    content: &self.settings.system_prompt,
                },
                ChatTurn {
                    role: "user",
                    content: question,
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(key.expose())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: ChatResponse = response.json().await?;
        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .unwrap_or_else(|| EMPTY_REPLY.to_string());

        tracing::info!(
            "Assistant replied ({} chars) in {:.1}s",
            text.len(),
            start.elapsed().as_secs_f32()
        );
        Ok(text)
    }
}

/// Assistant-side message for a failed submission
pub fn describe_error(error: &ProviderError) -> String {
    match error {
        ProviderError::ConfigurationMissing(_) => {
            "Please configure your OpenAI API key (OPENAI_API_KEY) first.".to_string()
        }
        ProviderError::Unauthorized => {
            "Please make sure you have configured a valid OpenAI API key (OPENAI_API_KEY)."
                .to_string()
        }
        ProviderError::QuotaExceeded => {
            "The travel assistant has used up its API quota. Questions are disabled until you \
             reopen the assistant."
                .to_string()
        }
        ProviderError::NotFound | ProviderError::Unknown(_) => {
            "Sorry, I couldn't reach the travel assistant. Please try again.".to_string()
        }
    }
}
