//! Unified error type exposed by **`promptpipe-core`**.
//!
//! Provider crates convert their internal errors into one of these variants
//! before bubbling them up through the [`ModelClient`](crate::ModelClient).
//! The pipeline itself never wraps or rewrites an error, so whatever a stage
//! returns is exactly what the caller of `invoke` sees.

use std::time::Duration;

use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, PipeError>;

#[derive(Debug, Error)]
pub enum PipeError {
    /// The template references a placeholder that the variable mapping does
    /// not provide.
    #[error("missing value for template variable `{name}`")]
    MissingVariable { name: String },

    /// The template text itself is malformed (unbalanced or empty braces).
    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    /// Model identifier, temperature or another configuration value is not
    /// accepted by the selected provider.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The request is malformed independent of configuration (e.g. empty
    /// prompt).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The credential is missing or was rejected by the provider.
    #[error("authentication with `{provider}` failed: {message}")]
    Authentication {
        provider: &'static str,
        message: String,
    },

    /// The provider signalled throttling. Retryable by the caller after
    /// backing off.
    #[error("rate limit exceeded at `{provider}`{}", retry_hint(.retry_after))]
    RateLimitExceeded {
        provider: &'static str,
        retry_after: Option<Duration>,
        message: String,
    },

    /// Network failure, timeout or any non-success provider response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("provider returned non-success status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response format: {0}")]
    Format(String),

    #[error("connection failed: {0}")]
    Connection(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl PipeError {
    /// `true` for failures a caller may reasonably retry after backing off.
    ///
    /// Nothing in this workspace retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PipeError::RateLimitExceeded { .. } | PipeError::Transport(_)
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, PipeError::Transport(TransportError::Timeout))
    }
}

fn retry_hint(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(after) => format!(" (retry after {}s)", after.as_secs()),
        None => String::new(),
    }
}
