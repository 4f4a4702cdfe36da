use std::time::Duration;

use promptpipe_core::error::{PipeError, TransportError};
use reqwest::StatusCode;

use crate::{PROVIDER, api_v1::ApiErrorResponse};

/// Every failure mode the HTTP client can hit.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("couldn’t deserialise body: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Gemini returned non-success status {status}: {body}")]
    Api {
        status: StatusCode,
        body: String,
        retry_after: Option<Duration>,
    },

    #[error("Gemini format error: {0}")]
    Format(String),
}

impl From<GeminiError> for PipeError {
    fn from(value: GeminiError) -> Self {
        match value {
            GeminiError::Http(e) if e.is_timeout() => TransportError::Timeout.into(),
            GeminiError::Http(e) => TransportError::Connection(Box::new(e)).into(),
            GeminiError::Serde(e) => TransportError::Format(e.to_string()).into(),
            GeminiError::Format(message) => TransportError::Format(message).into(),
            GeminiError::Api {
                status,
                body,
                retry_after,
            } => {
                let invalid_key =
                    ApiErrorResponse::parse(&body).is_some_and(|e| e.is_invalid_api_key());
                let message = ApiErrorResponse::message_from_body(&body);

                match status {
                    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PipeError::Authentication {
                        provider: PROVIDER,
                        message,
                    },
                    StatusCode::BAD_REQUEST if invalid_key => PipeError::Authentication {
                        provider: PROVIDER,
                        message,
                    },
                    StatusCode::TOO_MANY_REQUESTS => PipeError::RateLimitExceeded {
                        provider: PROVIDER,
                        retry_after,
                        message,
                    },
                    status => TransportError::Status {
                        status: status.as_u16(),
                        body,
                    }
                    .into(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: StatusCode, body: &str) -> GeminiError {
        GeminiError::Api {
            status,
            body: body.into(),
            retry_after: None,
        }
    }

    #[test]
    fn invalid_key_on_bad_request_is_authentication() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT","details":[{"reason":"API_KEY_INVALID"}]}}"#;
        assert!(matches!(
            PipeError::from(api(StatusCode::BAD_REQUEST, body)),
            PipeError::Authentication { provider: "gemini", ref message } if message == "API key not valid."
        ));
    }

    #[test]
    fn other_bad_request_is_transport() {
        let body = r#"{"error":{"code":400,"message":"bad field","status":"INVALID_ARGUMENT"}}"#;
        assert!(matches!(
            PipeError::from(api(StatusCode::BAD_REQUEST, body)),
            PipeError::Transport(TransportError::Status { status: 400, .. })
        ));
    }

    #[test]
    fn resource_exhausted_is_rate_limit() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        assert!(matches!(
            PipeError::from(api(StatusCode::TOO_MANY_REQUESTS, body)),
            PipeError::RateLimitExceeded { provider: "gemini", .. }
        ));
    }

    #[test]
    fn non_envelope_body_becomes_the_message() {
        assert!(matches!(
            PipeError::from(api(StatusCode::FORBIDDEN, "Forbidden")),
            PipeError::Authentication { provider: "gemini", ref message } if message == "Forbidden"
        ));
    }
}
