use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: i64,
    #[serde(default)]
    pub candidates_token_count: i64,
    #[serde(default)]
    pub total_token_count: i64,
}

/// Google RPC error envelope returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

impl ApiErrorResponse {
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// The provider's human-readable message, or the raw body when it is not
    /// the usual envelope.
    pub fn message_from_body(body: &str) -> String {
        Self::parse(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|| body.to_owned())
    }

    /// Gemini answers a bad key with `400 INVALID_ARGUMENT` and an
    /// `ErrorInfo` detail whose reason is `API_KEY_INVALID`.
    pub fn is_invalid_api_key(&self) -> bool {
        self.error
            .details
            .iter()
            .any(|d| d.get("reason").and_then(|r| r.as_str()) == Some("API_KEY_INVALID"))
    }
}
