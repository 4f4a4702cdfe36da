//! Generic message, prompt and response types used by *promptpipe-core*.
//!
//! They mirror the concepts exposed by most chat-completion APIs ("system",
//! "user", "assistant") while staying provider-agnostic, so that:
//!
//! * backends convert them into their wire structs via a simple `From`,
//! * tests can build prompts and responses without a transport layer.
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A single chat message independent of any specific LLM provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericMessage {
    pub content: String,
    pub role: GenericRole,
}

impl GenericMessage {
    /// Convenience constructor mirroring the field order used by common HTTP
    /// APIs (`role`, then `content`).
    ///
    /// ```rust
    /// use promptpipe_core::generic::{GenericMessage, GenericRole};
    ///
    /// let sys = GenericMessage::new("You are a helpful bot.", GenericRole::System);
    /// assert_eq!(sys.role, GenericRole::System);
    /// ```
    pub fn new(content: impl Into<String>, role: GenericRole) -> Self {
        Self {
            content: content.into(),
            role,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, GenericRole::User)
    }
}

/// High-level chat roles recognised by most LLM providers.
///
/// The `Display` implementation renders the canonical lowercase name.
#[derive(Debug, Clone, Serialize, Deserialize, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GenericRole {
    /// Global behaviour and style guidelines.
    System,
    /// Messages produced by the assistant / model.
    Assistant,
    /// Messages originating from the human user.
    User,
}

impl Display for GenericRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenericRole::System => write!(f, "system"),
            GenericRole::Assistant => write!(f, "assistant"),
            GenericRole::User => write!(f, "user"),
        }
    }
}

/// Output of a template renderer: the ordered chat messages with every
/// placeholder substituted.
///
/// Owned by the invocation that produced it and consumed by the model
/// client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedPrompt {
    messages: Vec<GenericMessage>,
}

impl RenderedPrompt {
    pub fn new(messages: Vec<GenericMessage>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[GenericMessage] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<GenericMessage> {
        self.messages
    }

    /// `true` when there is no message or every message is blank.
    pub fn is_empty(&self) -> bool {
        self.messages.iter().all(|m| m.content.trim().is_empty())
    }

    /// The message contents joined by newlines.
    pub fn to_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single-message prompt is the common case.
impl From<String> for RenderedPrompt {
    fn from(value: String) -> Self {
        Self::new(vec![GenericMessage::user(value)])
    }
}

impl From<&str> for RenderedPrompt {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<GenericMessage> for RenderedPrompt {
    fn from(value: GenericMessage) -> Self {
        Self::new(vec![value])
    }
}

/// Result of exactly one chat completion.
///
/// `text` is the only field the pipeline relies on; everything else is
/// provider metadata carried along for callers that care.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub text: String,
    /// Model name as reported back by the provider.
    pub model: Option<String>,
    pub finish_reason: Option<String>,
    pub usage: Option<GenericUsageReport>,
    /// The undecoded provider payload.
    pub raw: serde_json::Value,
}

impl ChatResponse {
    /// Response with text only, no provider metadata.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
            finish_reason: None,
            usage: None,
            raw: serde_json::Value::Null,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenericUsageReport {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
}
