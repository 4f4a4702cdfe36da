use promptpipe_core::config::ModelConfig;
use promptpipe_core::error::{PipeError, Result};
use promptpipe_core::generic::{GenericMessage, GenericRole, GenericUsageReport};
use serde::{Deserialize, Serialize};

use crate::model_map::map_model;

use super::common;

#[derive(Debug, Serialize, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatCompletionMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl ChatCompletionRequest {
    pub fn new(model: String, messages: Vec<ChatCompletionMessage>) -> Self {
        Self {
            model,
            messages,
            temperature: None,
        }
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build the request body for `messages` under `config`.
    ///
    /// # Errors
    ///
    /// * [`PipeError::InvalidConfiguration`] – the configured model belongs
    ///   to another provider.
    pub fn from_config(config: &ModelConfig, messages: Vec<GenericMessage>) -> Result<Self> {
        let model = map_model(config.model()).ok_or_else(|| {
            PipeError::InvalidConfiguration(format!(
                "OpenAI backend does not support model `{}`",
                config.model()
            ))
        })?;

        let request = Self::new(
            model.into_owned(),
            messages.into_iter().map(Into::into).collect(),
        );

        Ok(match config.temperature() {
            Some(temperature) => request.temperature(temperature),
            None => request,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    System,
    Assistant,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ChatCompletionMessage {
    pub role: MessageRole,
    pub content: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionMessageForResponse {
    pub role: MessageRole,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionChoice {
    #[serde(default)]
    pub index: i64,
    pub message: ChatCompletionMessageForResponse,
    /// `stop`, `length`, `content_filter`, … kept as text so new reasons
    /// don't break decoding.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<ChatCompletionChoice>,
    #[serde(default)]
    pub usage: Option<common::Usage>,
    #[serde(default)]
    pub system_fingerprint: Option<String>,
}

impl From<GenericRole> for MessageRole {
    fn from(value: GenericRole) -> Self {
        match value {
            GenericRole::System => MessageRole::System,
            GenericRole::Assistant => MessageRole::Assistant,
            GenericRole::User => MessageRole::User,
        }
    }
}

impl From<GenericMessage> for ChatCompletionMessage {
    fn from(value: GenericMessage) -> Self {
        Self {
            role: value.role.into(),
            content: value.content,
        }
    }
}

impl From<common::Usage> for GenericUsageReport {
    fn from(value: common::Usage) -> Self {
        GenericUsageReport {
            prompt_tokens: value.prompt_tokens as i64,
            completion_tokens: value.completion_tokens as i64,
            total_tokens: value.total_tokens as i64,
        }
    }
}
