use std::time::Duration;

use promptpipe_core::config::Credential;
use reqwest::{
    Client as HttpClient, Response,
    header::{CONTENT_TYPE, RETRY_AFTER},
};

use crate::{
    api_v1::{ChatCompletionRequest, ChatCompletionResponse},
    error::OpenAiError,
};

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Minimal HTTP client for OpenAI’s *chat/completions* endpoint.
///
/// * Non-streaming only (one request ▶ one response), never retries.
/// * Accepts and returns the `api_v1` request / response structs defined
///   in this crate.
/// * Shares a single `reqwest::Client`, so cloning `OpenAiClient` is cheap.
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: Credential,
    http: HttpClient,
    base: String,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base", &self.base)
            .field("api_key", &self.api_key)
            .finish()
    }
}

impl OpenAiClient {
    /// Build with a caller-provided `reqwest::Client` (proxy settings,
    /// custom TLS, …) and an optional base URL.
    pub fn with_http(api_key: Credential, http: HttpClient, base_url: Option<String>) -> Self {
        let base = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        Self {
            api_key,
            http,
            base: base.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Perform a **non-streaming** chat completion.
    ///
    /// Returns the decoded response together with the raw JSON body.
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
        timeout: Option<Duration>,
    ) -> Result<(ChatCompletionResponse, serde_json::Value), OpenAiError> {
        let url = format!("{}/chat/completions", self.base);
        let mut builder = self
            .http
            .post(url)
            .bearer_auth(self.api_key.expose())
            .header(CONTENT_TYPE, "application/json")
            .json(request);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let resp = builder.send().await?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        let bytes = resp.bytes().await?;
        let raw: serde_json::Value = serde_json::from_slice(&bytes)?;
        let parsed: ChatCompletionResponse = serde_json::from_value(raw.clone())?;
        Ok((parsed, raw))
    }
}

async fn api_error(resp: Response) -> OpenAiError {
    let status = resp.status();
    let retry_after = resp
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs);
    let body = resp.text().await.unwrap_or_default();

    OpenAiError::Api {
        status,
        body,
        retry_after,
    }
}
