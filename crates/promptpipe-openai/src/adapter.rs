use std::{env, ops::RangeInclusive, sync::Arc, time::Duration};

use promptpipe_core::{
    config::{Credential, ModelConfig},
    error::{PipeError, Result},
    model::{Model, OpenAiModel},
};
use reqwest::Client as HttpClient;

use crate::{PROVIDER, client::OpenAiClient, model_map::map_model};

/// Sampling temperatures OpenAI accepts.
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 0.0..=2.0;

/// Environment variable read by [`OpenAiAdapterBuilder::new_from_env`].
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Wires the HTTP client [`OpenAiClient`] and a validated [`ModelConfig`]
/// into a value that implements
/// [`promptpipe_core::provider::ChatCompletionProvider`].
///
/// The type exposes no request methods of its own; plug it into a
/// [`promptpipe_core::ModelClient`].
#[derive(Debug)]
pub struct OpenAiAdapter {
    pub(crate) client: Arc<OpenAiClient>,
    pub(crate) config: ModelConfig,
}

impl OpenAiAdapter {
    /// Build directly from an explicit configuration.
    pub fn from_config(config: ModelConfig) -> Result<Self> {
        OpenAiAdapterBuilder::from_config(config).build()
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

/// Builder for [`OpenAiAdapter`].
///
/// # Typical usage
///
/// ```rust,no_run
/// use promptpipe_openai::OpenAiAdapterBuilder;
/// use promptpipe_core::model::OpenAiModel;
///
/// let backend = OpenAiAdapterBuilder::new_from_env()
///     .with_model(OpenAiModel::Gpt35Turbo)
///     .with_temperature(0.5)
///     .build()
///     .expect("OPENAI_API_KEY must be set");
/// ```
#[derive(Debug, Default)]
pub struct OpenAiAdapterBuilder {
    pub(crate) api_key: Option<Credential>,
    pub(crate) model: Option<Model>,
    pub(crate) temperature: Option<f64>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) base_url: Option<String>,
    pub(crate) http: Option<HttpClient>,
}

impl OpenAiAdapterBuilder {
    /// Create an *empty* builder. Remember to supply an API key manually.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor that tries to load the `OPENAI_API_KEY`
    /// environment variable.
    ///
    /// Never fails. Missing keys only surface during [`Self::build`].
    pub fn new_from_env() -> Self {
        Self {
            api_key: env::var(API_KEY_ENV).ok().map(Credential::new),
            ..Self::default()
        }
    }

    /// Start from every field of `config`.
    pub fn from_config(config: ModelConfig) -> Self {
        Self {
            api_key: Some(config.credential().clone()),
            model: Some(config.model().clone()),
            temperature: config.temperature(),
            timeout: config.timeout(),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<Credential>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Defaults to `gpt-4o-mini`.
    pub fn with_model(mut self, model: impl Into<Model>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Point at a compatible server instead of `api.openai.com`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Use a preconfigured `reqwest::Client` (proxies, custom TLS, …).
    pub fn with_http_client(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Finalise the builder and return a ready-to-use adapter.
    ///
    /// # Errors
    ///
    /// * [`PipeError::Authentication`] – the API key is missing or empty.
    /// * [`PipeError::InvalidConfiguration`] – temperature outside
    ///   [`TEMPERATURE_RANGE`], empty model, or a non-OpenAI model.
    pub fn build(self) -> Result<OpenAiAdapter> {
        let api_key = self.api_key.ok_or_else(|| PipeError::Authentication {
            provider: PROVIDER,
            message: format!("missing env variable: `{API_KEY_ENV}`"),
        })?;

        let mut config = ModelConfig::new(
            self.model.unwrap_or(Model::OpenAi(OpenAiModel::Gpt4oMini)),
            api_key,
        );
        if let Some(temperature) = self.temperature {
            config = config.with_temperature(temperature);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        config.validate(PROVIDER, TEMPERATURE_RANGE)?;
        if map_model(config.model()).is_none() {
            return Err(PipeError::InvalidConfiguration(format!(
                "OpenAI backend does not support model `{}`",
                config.model()
            )));
        }

        let http = match self.http {
            Some(http) => http,
            None => HttpClient::builder().build().map_err(|e| {
                PipeError::InvalidConfiguration(format!("failed to build HTTP client: {e}"))
            })?,
        };

        let client = OpenAiClient::with_http(config.credential().clone(), http, self.base_url);

        Ok(OpenAiAdapter {
            client: Arc::new(client),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use promptpipe_core::model::GeminiModel;

    use super::*;

    #[test]
    fn missing_key_is_authentication_error() {
        let err = OpenAiAdapterBuilder::new().build().unwrap_err();
        assert!(matches!(err, PipeError::Authentication { provider: "openai", .. }));
    }

    #[test]
    fn temperature_above_two_is_rejected() {
        let err = OpenAiAdapterBuilder::new()
            .with_api_key("sk")
            .with_temperature(2.1)
            .build()
            .unwrap_err();
        assert!(matches!(err, PipeError::InvalidConfiguration(_)));
    }

    #[test]
    fn foreign_model_is_rejected() {
        let err = OpenAiAdapterBuilder::new()
            .with_api_key("sk")
            .with_model(GeminiModel::Gemini15Pro)
            .build()
            .unwrap_err();
        assert!(matches!(err, PipeError::InvalidConfiguration(_)));
    }

    #[test]
    fn from_config_keeps_every_field() {
        let config = ModelConfig::new(OpenAiModel::Gpt35Turbo, "sk")
            .with_temperature(0.5)
            .with_timeout(Duration::from_secs(3));
        let adapter = OpenAiAdapter::from_config(config).unwrap();

        assert_eq!(adapter.config.model(), &Model::OpenAi(OpenAiModel::Gpt35Turbo));
        assert_eq!(adapter.config.temperature(), Some(0.5));
        assert_eq!(adapter.config.timeout(), Some(Duration::from_secs(3)));
        assert_eq!(adapter.base_url(), "https://api.openai.com/v1");
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let adapter = OpenAiAdapterBuilder::new()
            .with_api_key("sk")
            .with_base_url("http://localhost:8080/v1/")
            .build()
            .unwrap();
        assert_eq!(adapter.base_url(), "http://localhost:8080/v1");
    }
}
