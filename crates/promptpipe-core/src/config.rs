//! Immutable model configuration handed to a backend at construction time.
//!
//! ```rust
//! use promptpipe_core::config::ModelConfig;
//! use promptpipe_core::model::OpenAiModel;
//!
//! let config = ModelConfig::new(OpenAiModel::Gpt35Turbo, "sk-test")
//!     .with_temperature(0.5);
//! assert_eq!(config.temperature(), Some(0.5));
//! ```
use std::{fmt, ops::RangeInclusive, time::Duration};

use crate::{
    error::{PipeError, Result},
    model::Model,
};

/// API credential. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    model: Model,
    credential: Credential,
    temperature: Option<f64>,
    timeout: Option<Duration>,
}

impl ModelConfig {
    pub fn new(model: impl Into<Model>, credential: impl Into<Credential>) -> Self {
        Self {
            model: model.into(),
            credential: credential.into(),
            temperature: None,
            timeout: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Upper bound for a single request, connection included.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Check the values every provider needs before any network call.
    ///
    /// # Errors
    ///
    /// * [`PipeError::Authentication`] – the credential is empty.
    /// * [`PipeError::InvalidConfiguration`] – empty model identifier, or a
    ///   temperature outside `temperature_range` (NaN included).
    pub fn validate(
        &self,
        provider: &'static str,
        temperature_range: RangeInclusive<f64>,
    ) -> Result<()> {
        if self.credential.is_empty() {
            return Err(PipeError::Authentication {
                provider,
                message: "no credential configured".into(),
            });
        }

        if self.model.as_str().trim().is_empty() {
            return Err(PipeError::InvalidConfiguration(
                "model identifier must not be empty".into(),
            ));
        }

        if let Some(temperature) = self.temperature {
            if !temperature_range.contains(&temperature) {
                return Err(PipeError::InvalidConfiguration(format!(
                    "temperature {temperature} outside {}..={} accepted by `{provider}`",
                    temperature_range.start(),
                    temperature_range.end()
                )));
            }
        }

        Ok(())
    }
}
