use std::{env, ops::RangeInclusive, sync::Arc, time::Duration};

use promptpipe_core::{
    config::{Credential, ModelConfig},
    error::{PipeError, Result},
    model::{GeminiModel, Model},
};
use reqwest::Client as HttpClient;

use crate::{PROVIDER, client::GeminiClient, model_map::map_model};

/// Sampling temperatures Gemini accepts.
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 0.0..=2.0;

/// Environment variables read by [`GeminiAdapterBuilder::new_from_env`], in
/// order of preference.
pub const API_KEY_ENVS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Gemini counterpart of the OpenAI adapter: a validated [`ModelConfig`]
/// plus a shared [`GeminiClient`].
#[derive(Debug)]
pub struct GeminiAdapter {
    pub(crate) client: Arc<GeminiClient>,
    pub(crate) config: ModelConfig,
    /// Wire name of the configured model, resolved once at build time.
    pub(crate) model: String,
}

impl GeminiAdapter {
    pub fn from_config(config: ModelConfig) -> Result<Self> {
        GeminiAdapterBuilder::from_config(config).build()
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

/// Builder for [`GeminiAdapter`].
///
/// ```rust,no_run
/// use promptpipe_gemini::GeminiAdapterBuilder;
/// use promptpipe_core::model::GeminiModel;
///
/// let backend = GeminiAdapterBuilder::new_from_env()
///     .with_model(GeminiModel::Gemini15Flash)
///     .build()
///     .expect("GEMINI_API_KEY or GOOGLE_API_KEY must be set");
/// ```
#[derive(Debug, Default)]
pub struct GeminiAdapterBuilder {
    pub(crate) api_key: Option<Credential>,
    pub(crate) model: Option<Model>,
    pub(crate) temperature: Option<f64>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) base_url: Option<String>,
    pub(crate) http: Option<HttpClient>,
}

impl GeminiAdapterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the key from the first of [`API_KEY_ENVS`] that is set.
    pub fn new_from_env() -> Self {
        Self {
            api_key: API_KEY_ENVS
                .iter()
                .find_map(|name| env::var(name).ok())
                .map(Credential::new),
            ..Self::default()
        }
    }

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

    /// Defaults to `gemini-1.5-flash`.
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

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_http_client(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// # Errors
    ///
    /// * [`PipeError::Authentication`] – the API key is missing or empty.
    /// * [`PipeError::InvalidConfiguration`] – temperature outside
    ///   [`TEMPERATURE_RANGE`], empty model, or a non-Gemini model.
    pub fn build(self) -> Result<GeminiAdapter> {
        let api_key = self.api_key.ok_or_else(|| PipeError::Authentication {
            provider: PROVIDER,
            message: format!("missing env variable: one of {API_KEY_ENVS:?}"),
        })?;

        let mut config = ModelConfig::new(
            self.model.unwrap_or(Model::Gemini(GeminiModel::Gemini15Flash)),
            api_key,
        );
        if let Some(temperature) = self.temperature {
            config = config.with_temperature(temperature);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        config.validate(PROVIDER, TEMPERATURE_RANGE)?;
        let model = map_model(config.model())
            .ok_or_else(|| {
                PipeError::InvalidConfiguration(format!(
                    "Gemini backend does not support model `{}`",
                    config.model()
                ))
            })?
            .into_owned();

        let http = match self.http {
            Some(http) => http,
            None => HttpClient::builder().build().map_err(|e| {
                PipeError::InvalidConfiguration(format!("failed to build HTTP client: {e}"))
            })?,
        };

        let client = GeminiClient::with_http(config.credential().clone(), http, self.base_url);

        Ok(GeminiAdapter {
            client: Arc::new(client),
            config,
            model,
        })
    }
}
