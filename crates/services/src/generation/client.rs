use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use study_core::model::AppSettings;

use crate::error::GenerationError;

/// An opaque text-generation service: prompt in, text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Whether the backend can serve requests at all.
    fn enabled(&self) -> bool {
        true
    }

    /// Generate text for `prompt`. Returned text is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the backend is unavailable or fails.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Clone, Debug)]
pub struct ChatCompletionsConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl ChatCompletionsConfig {
    /// Build a config from validated settings; `None` without an API key.
    #[must_use]
    pub fn from_settings(settings: &AppSettings) -> Option<Self> {
        let api_key = settings.api_key()?;
        Some(Self {
            base_url: settings.api_base_url().to_string(),
            api_key: api_key.to_string(),
            model: settings.api_model().to_string(),
        })
    }
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    config: Option<ChatCompletionsConfig>,
}

impl ChatCompletionsClient {
    #[must_use]
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(ChatCompletionsConfig::from_settings(settings))
    }

    #[must_use]
    pub fn new(config: Option<ChatCompletionsConfig>) -> Self {
        if config.is_none() {
            tracing::warn!("AI API key not found; generation is disabled");
        }
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(config: &ChatCompletionsConfig) -> String {
        format!("{}/chat/completions", config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    fn enabled(&self) -> bool {
        self.config.is_some()
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let config = self.config.as_ref().ok_or(GenerationError::Disabled)?;

        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            temperature: 0.2,
        };

        tracing::debug!(model = %config.model, prompt_len = prompt.len(), "sending generation request");
        let response = self
            .client
            .post(Self::endpoint(config))
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "generation request failed");
            return Err(GenerationError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(GenerationError::EmptyResponse)?;

        Ok(content)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
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

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::AppSettingsDraft;

    #[tokio::test]
    async fn unconfigured_client_is_disabled() {
        let client = ChatCompletionsClient::from_settings(&AppSettings::default());
        assert!(!client.enabled());
        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err, GenerationError::Disabled));
    }

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        let settings = AppSettingsDraft {
            api_key: Some("k".into()),
            api_base_url: Some("http://localhost:1234/v1/".into()),
            api_model: Some("local-model".into()),
        }
        .validate()
        .unwrap();
        let config = ChatCompletionsConfig::from_settings(&settings).unwrap();
        assert_eq!(
            ChatCompletionsClient::endpoint(&config),
            "http://localhost:1234/v1/chat/completions"
        );
        assert_eq!(config.model, "local-model");
    }

    #[test]
    fn response_without_content_parses() {
        let body: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(body.choices[0].message.content.is_none());
    }
}
