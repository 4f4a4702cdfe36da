use std::time::Duration;

use promptpipe_core::config::Credential;
use reqwest::{
    Client as HttpClient, Response,
    header::{CONTENT_TYPE, RETRY_AFTER},
};

use crate::{
    api_v1::{GenerateContentRequest, GenerateContentResponse},
    error::GeminiError,
};

pub(crate) const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Minimal HTTP client for Gemini's `models/{model}:generateContent`
/// endpoint.
///
/// * One request ▶ one response, never retries.
/// * Shares a single `reqwest::Client`, so cloning `GeminiClient` is cheap.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: Credential,
    http: HttpClient,
    base: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base", &self.base)
            .field("api_key", &self.api_key)
            .finish()
    }
}

impl GeminiClient {
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

    /// Generate content with `model`.
    ///
    /// Returns the decoded response together with the raw JSON body.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
        timeout: Option<Duration>,
    ) -> Result<(GenerateContentResponse, serde_json::Value), GeminiError> {
        let url = format!("{}/models/{model}:generateContent", self.base);
        let mut builder = self
            .http
            .post(url)
            .header(API_KEY_HEADER, self.api_key.expose())
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
        let parsed: GenerateContentResponse = serde_json::from_value(raw.clone())?;
        Ok((parsed, raw))
    }
}

async fn api_error(resp: Response) -> GeminiError {
    let status = resp.status();
    let retry_after = resp
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs);
    let body = resp.text().await.unwrap_or_default();

    GeminiError::Api {
        status,
        body,
        retry_after,
    }
}
