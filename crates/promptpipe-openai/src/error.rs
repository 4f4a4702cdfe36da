use std::time::Duration;

use promptpipe_core::error::{PipeError, TransportError};
use reqwest::StatusCode;

use crate::{PROVIDER, api_v1::ApiErrorResponse};

/// Every failure mode the HTTP client can hit.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("couldn’t deserialise body: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("OpenAI returned non-success status {status}: {body}")]
    Api {
        status: StatusCode,
        body: String,
        retry_after: Option<Duration>,
    },

    #[error("OpenAI format error: {0}")]
    Format(String),
}

impl From<OpenAiError> for PipeError {
    fn from(value: OpenAiError) -> Self {
        match value {
            OpenAiError::Http(e) if e.is_timeout() => TransportError::Timeout.into(),
            OpenAiError::Http(e) => TransportError::Connection(Box::new(e)).into(),
            OpenAiError::Serde(e) => TransportError::Format(e.to_string()).into(),
            OpenAiError::Format(message) => TransportError::Format(message).into(),
            OpenAiError::Api {
                status,
                body,
                retry_after,
            } => match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PipeError::Authentication {
                    provider: PROVIDER,
                    message: ApiErrorResponse::message_from_body(&body),
                },
                StatusCode::TOO_MANY_REQUESTS => PipeError::RateLimitExceeded {
                    provider: PROVIDER,
                    retry_after,
                    message: ApiErrorResponse::message_from_body(&body),
                },
                status => TransportError::Status {
                    status: status.as_u16(),
                    body,
                }
                .into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: StatusCode, body: &str) -> OpenAiError {
        OpenAiError::Api {
            status,
            body: body.into(),
            retry_after: None,
        }
    }

    #[test]
    fn unauthorized_maps_to_authentication() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        let err = PipeError::from(api(StatusCode::UNAUTHORIZED, body));
        assert!(matches!(
            err,
            PipeError::Authentication { provider: "openai", ref message }
                if message == "Incorrect API key provided"
        ));
    }

    #[test]
    fn too_many_requests_maps_to_rate_limit() {
        let err = PipeError::from(api(StatusCode::TOO_MANY_REQUESTS, "slow down"));
        assert!(matches!(
            err,
            PipeError::RateLimitExceeded { ref message, .. } if message == "slow down"
        ));
    }

    #[test]
    fn other_statuses_map_to_transport() {
        let err = PipeError::from(api(StatusCode::BAD_GATEWAY, "upstream"));
        assert!(matches!(
            err,
            PipeError::Transport(TransportError::Status { status: 502, ref body }) if body == "upstream"
        ));
    }
}
