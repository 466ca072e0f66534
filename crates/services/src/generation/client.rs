use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

#[derive(Clone, Debug)]
pub struct ChatConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl ChatConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("CLURIOUS_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = env::var("CLURIOUS_AI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("CLURIOUS_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// Thin chat-completions wrapper shared by quiz, notes and insight prompts.
///
/// Without a configured API key the client stays constructible but every
/// call fails with `GenerationError::Disabled`, so callers can degrade
/// gracefully.
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    config: Option<ChatConfig>,
}

impl ChatClient {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ChatConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<ChatConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Free-form completion for a prompt.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the client is disabled, the request
    /// fails, or the response carries no content.
    pub async fn complete(
        &self,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, GenerationError> {
        self.request(prompt, temperature, None).await
    }

    /// Completion constrained to a single JSON object.
    ///
    /// # Errors
    ///
    /// Same as `complete`.
    pub async fn complete_json(
        &self,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, GenerationError> {
        self.request(prompt, temperature, Some(ResponseFormat::json_object()))
            .await
    }

    async fn request(
        &self,
        prompt: &str,
        temperature: f32,
        response_format: Option<ResponseFormat>,
    ) -> Result<String, GenerationError> {
        let config = self.config.as_ref().ok_or(GenerationError::Disabled)?;

        let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            temperature,
            response_format,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenerationError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GenerationError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl ResponseFormat {
    fn json_object() -> Self {
        Self {
            kind: "json_object",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
