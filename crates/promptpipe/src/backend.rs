//! Provider selection at construction time.
//!
//! [`AnyBackend`] wraps whichever provider adapter the caller picked and
//! forwards [`ChatCompletionProvider`] to it, so a single
//! `ModelClient<AnyBackend>` type covers every provider compiled in.
use std::{fmt::Display, str::FromStr};

use promptpipe_core::{
    BoxFuture,
    config::ModelConfig,
    error::{PipeError, Result},
    generic::{ChatResponse, GenericMessage},
    model::{GeminiModel, Model, OpenAiModel},
    provider::ChatCompletionProvider,
};

/// Hosted model providers known to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provider {
    #[default]
    OpenAi,
    Gemini,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
        }
    }

    /// Model used when the caller does not name one.
    pub fn default_model(self) -> Model {
        match self {
            Provider::OpenAi => OpenAiModel::Gpt35Turbo.into(),
            Provider::Gemini => GeminiModel::Gemini15Flash.into(),
        }
    }

    /// Environment variables conventionally holding this provider's key, in
    /// order of preference.
    pub fn api_key_envs(self) -> &'static [&'static str] {
        match self {
            Provider::OpenAi => &["OPENAI_API_KEY"],
            Provider::Gemini => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
        }
    }
}

impl Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = PipeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "gemini" | "google" => Ok(Provider::Gemini),
            other => Err(PipeError::InvalidConfiguration(format!(
                "unknown provider `{other}` (expected `openai` or `gemini`)"
            ))),
        }
    }
}

/// One of the compiled-in provider adapters.
#[derive(Debug)]
pub enum AnyBackend {
    #[cfg(feature = "openai")]
    OpenAi(promptpipe_openai::OpenAiAdapter),
    #[cfg(feature = "gemini")]
    Gemini(promptpipe_gemini::GeminiAdapter),
}

impl AnyBackend {
    /// Build the adapter for `provider` from `config`.
    ///
    /// `base_url` overrides the provider's public endpoint.
    ///
    /// # Errors
    ///
    /// Whatever the provider's builder rejects, plus
    /// [`PipeError::InvalidConfiguration`] when `provider` was not compiled
    /// in.
    pub fn connect(
        provider: Provider,
        config: ModelConfig,
        base_url: Option<String>,
    ) -> Result<Self> {
        match provider {
            #[cfg(feature = "openai")]
            Provider::OpenAi => {
                let mut builder = promptpipe_openai::OpenAiAdapterBuilder::from_config(config);
                if let Some(base_url) = base_url {
                    builder = builder.with_base_url(base_url);
                }
                builder.build().map(AnyBackend::OpenAi)
            }
            #[cfg(feature = "gemini")]
            Provider::Gemini => {
                let mut builder = promptpipe_gemini::GeminiAdapterBuilder::from_config(config);
                if let Some(base_url) = base_url {
                    builder = builder.with_base_url(base_url);
                }
                builder.build().map(AnyBackend::Gemini)
            }
            #[allow(unreachable_patterns)]
            other => {
                let _ = (config, base_url);
                Err(PipeError::InvalidConfiguration(format!(
                    "provider `{other}` is not enabled in this build"
                )))
            }
        }
    }

    fn inner(&self) -> &dyn ChatCompletionProvider {
        match self {
            #[cfg(feature = "openai")]
            AnyBackend::OpenAi(adapter) => adapter,
            #[cfg(feature = "gemini")]
            AnyBackend::Gemini(adapter) => adapter,
        }
    }
}

impl ChatCompletionProvider for AnyBackend {
    fn provider_name(&self) -> &'static str {
        self.inner().provider_name()
    }

    fn config(&self) -> &ModelConfig {
        self.inner().config()
    }

    fn chat_complete<'p>(
        &'p self,
        messages: Vec<GenericMessage>,
    ) -> BoxFuture<'p, Result<ChatResponse>> {
        self.inner().chat_complete(messages)
    }
}
