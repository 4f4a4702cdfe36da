use promptpipe_core::config::ModelConfig;
use promptpipe_core::error::{PipeError, Result};
use promptpipe_core::generic::{GenericMessage, GenericRole, GenericUsageReport};
use serde::{Deserialize, Serialize};

use super::common::UsageMetadata;

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Build the request body for `messages` under `config`.
    ///
    /// System messages are lifted into `systemInstruction`; assistant
    /// messages use Gemini's `model` role.
    ///
    /// # Errors
    ///
    /// * [`PipeError::InvalidRequest`] – nothing but system messages.
    pub fn from_config(config: &ModelConfig, messages: Vec<GenericMessage>) -> Result<Self> {
        let mut system = Vec::new();
        let mut contents = Vec::new();

        for message in messages {
            let part = Part::text(message.content);
            match message.role {
                GenericRole::System => system.push(part),
                GenericRole::User => contents.push(Content::new(ContentRole::User, part)),
                GenericRole::Assistant => contents.push(Content::new(ContentRole::Model, part)),
            }
        }

        if contents.is_empty() {
            return Err(PipeError::InvalidRequest(
                "Gemini needs at least one user or assistant message".into(),
            ));
        }

        Ok(Self {
            contents,
            system_instruction: (!system.is_empty()).then(|| Content {
                role: None,
                parts: system,
            }),
            generation_config: config.temperature().map(|temperature| GenerationConfig {
                temperature: Some(temperature),
            }),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ContentRole>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn new(role: ContentRole, part: Part) -> Self {
        Self {
            role: Some(role),
            parts: vec![part],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentRole {
    User,
    Model,
}

/// Only text parts are produced; other part kinds in a response decode with
/// `text == None` and are skipped.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    pub model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub index: Option<i64>,
}

impl Candidate {
    /// Concatenated text of every text part, `None` if there is none.
    pub fn text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect();

        (!parts.is_empty()).then(|| parts.concat())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl From<UsageMetadata> for GenericUsageReport {
    fn from(value: UsageMetadata) -> Self {
        GenericUsageReport {
            prompt_tokens: value.prompt_token_count,
            completion_tokens: value.candidates_token_count,
            total_tokens: value.total_token_count,
        }
    }
}
