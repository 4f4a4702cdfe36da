//! Model identifiers used throughout the **promptpipe** workspace.
//!
//! Well-known models get an enum variant so application code never has to
//! type literal strings such as `"gpt-4o-mini"`. Anything else (self-hosted,
//! beta or freshly released models) goes through [`Model::Custom`].
//!
//! # Adding more models
//!
//! 1. Add the variant to the provider enum (`OpenAiModel`, `GeminiModel`).
//! 2. Give it an identifier in the `as_str` match.
//! 3. The compiler points at every provider `match` that needs updating.
//!
//! # Example
//!
//! ```rust
//! use promptpipe_core::model::{Model, OpenAiModel};
//!
//! assert_eq!(Model::from(OpenAiModel::Gpt4oMini),
//!            Model::OpenAi(OpenAiModel::Gpt4oMini));
//! assert_eq!("gpt-3.5-turbo".parse::<Model>().unwrap(),
//!            Model::OpenAi(OpenAiModel::Gpt35Turbo));
//! ```
use std::{borrow::Cow, fmt::Display, str::FromStr};

use crate::error::PipeError;

/// Universal identifier for an LLM model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    /// Built-in OpenAI models (chat completion API).
    OpenAi(OpenAiModel),
    /// Built-in Google Gemini models (generateContent API).
    Gemini(GeminiModel),
    /// Any model name not covered by a dedicated enum. Passed to whichever
    /// provider the caller selects, verbatim.
    Custom(Cow<'static, str>),
}

impl Model {
    /// Identifier as sent on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Model::OpenAi(m) => m.as_str(),
            Model::Gemini(m) => m.as_str(),
            Model::Custom(name) => name,
        }
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Model {
    type Err = PipeError;

    /// Known identifiers map to typed variants, anything else non-empty
    /// becomes [`Model::Custom`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PipeError::InvalidConfiguration(
                "model identifier must not be empty".into(),
            ));
        }

        if let Some(m) = OpenAiModel::ALL.iter().find(|m| m.as_str() == s) {
            return Ok(Model::OpenAi(*m));
        }
        if let Some(m) = GeminiModel::ALL.iter().find(|m| m.as_str() == s) {
            return Ok(Model::Gemini(*m));
        }

        Ok(Model::Custom(Cow::Owned(s.to_owned())))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenAiModel {
    Gpt35Turbo,
    Gpt4o,
    Gpt4oMini,
}

impl OpenAiModel {
    pub const ALL: [OpenAiModel; 3] = [Self::Gpt35Turbo, Self::Gpt4o, Self::Gpt4oMini];

    pub fn as_str(self) -> &'static str {
        match self {
            OpenAiModel::Gpt35Turbo => "gpt-3.5-turbo",
            OpenAiModel::Gpt4o => "gpt-4o",
            OpenAiModel::Gpt4oMini => "gpt-4o-mini",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeminiModel {
    Gemini15Flash,
    Gemini15Pro,
    Gemini20Flash,
}

impl GeminiModel {
    pub const ALL: [GeminiModel; 3] = [
        Self::Gemini15Flash,
        Self::Gemini15Pro,
        Self::Gemini20Flash,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GeminiModel::Gemini15Flash => "gemini-1.5-flash",
            GeminiModel::Gemini15Pro => "gemini-1.5-pro",
            GeminiModel::Gemini20Flash => "gemini-2.0-flash",
        }
    }
}

impl From<OpenAiModel> for Model {
    fn from(val: OpenAiModel) -> Self {
        Model::OpenAi(val)
    }
}

impl From<GeminiModel> for Model {
    fn from(val: GeminiModel) -> Self {
        Model::Gemini(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_and_custom_models() {
        assert_eq!(
            "gemini-2.0-flash".parse::<Model>().unwrap(),
            Model::Gemini(GeminiModel::Gemini20Flash)
        );
        assert_eq!(
            " my-finetune ".parse::<Model>().unwrap(),
            Model::Custom("my-finetune".into())
        );
    }

    #[test]
    fn empty_model_is_rejected() {
        assert!(matches!(
            "   ".parse::<Model>(),
            Err(PipeError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(Model::from(OpenAiModel::Gpt4o).to_string(), "gpt-4o");
    }
}
