use promptpipe_core::{
    BoxFuture,
    config::ModelConfig,
    error::Result,
    generic::{ChatResponse, GenericMessage},
    provider::ChatCompletionProvider,
};

use crate::{GeminiAdapter, PROVIDER, api_v1::GenerateContentRequest, error::GeminiError};

impl ChatCompletionProvider for GeminiAdapter {
    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn chat_complete<'p>(
        &'p self,
        messages: Vec<GenericMessage>,
    ) -> BoxFuture<'p, Result<ChatResponse>> {
        Box::pin(async move {
            let request = GenerateContentRequest::from_config(&self.config, messages)?;

            #[cfg(feature = "tracing")]
            tracing::debug!(
                model = %self.model,
                contents = request.contents.len(),
                "sending Gemini generateContent"
            );

            let (response, raw) = self
                .client
                .generate_content(&self.model, &request, self.config.timeout())
                .await?;

            let Some(candidate) = response.candidates.first() else {
                let reason = response
                    .prompt_feedback
                    .and_then(|f| f.block_reason)
                    .map(|r| format!("prompt blocked: {r}"))
                    .unwrap_or_else(|| "response has no candidates".into());
                return Err(GeminiError::Format(reason).into());
            };

            let Some(text) = candidate.text() else {
                let reason = match &candidate.finish_reason {
                    Some(r) => format!("candidate has no text (finish reason {r})"),
                    None => "candidate has no text".into(),
                };
                return Err(GeminiError::Format(reason).into());
            };

            #[cfg(feature = "tracing")]
            tracing::debug!(
                finish_reason = ?candidate.finish_reason,
                "Gemini generateContent finished"
            );

            Ok(ChatResponse {
                text,
                model: response.model_version.clone(),
                finish_reason: candidate.finish_reason.clone(),
                usage: response.usage_metadata.map(Into::into),
                raw,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockito::Matcher;
    use promptpipe_core::{
        ModelClient,
        error::{PipeError, TransportError},
        model::GeminiModel,
    };
    use serde_json::json;

    use super::*;
    use crate::GeminiAdapterBuilder;

    const PROMPT: &str = "Tell me a few achievements of Barack Obama";
    const PATH: &str = "/models/gemini-1.5-flash:generateContent";

    fn adapter(base_url: String) -> GeminiAdapter {
        GeminiAdapterBuilder::new()
            .with_api_key("g-key")
            .with_model(GeminiModel::Gemini15Flash)
            .with_temperature(0.5)
            .with_base_url(base_url)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn sends_one_request_and_extracts_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("x-goog-api-key", "g-key")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{"role": "user", "parts": [{"text": PROMPT}]}],
                "generationConfig": {"temperature": 0.5}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": "He won the Nobel Peace Prize."}]},
                        "finishReason": "STOP",
                        "index": 0
                    }],
                    "usageMetadata": {"promptTokenCount": 9, "candidatesTokenCount": 7, "totalTokenCount": 16},
                    "modelVersion": "gemini-1.5-flash-002"
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let client = ModelClient::new(adapter(server.url()));
        let response = client.invoke(PROMPT).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.text, "He won the Nobel Peace Prize.");
        assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
        assert_eq!(response.model.as_deref(), Some("gemini-1.5-flash-002"));
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(16));
    }

    #[tokio::test]
    async fn invalid_key_is_authentication_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(400)
            .with_body(r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT","details":[{"@type":"type.googleapis.com/google.rpc.ErrorInfo","reason":"API_KEY_INVALID"}]}}"#)
            .create_async()
            .await;

        let err = adapter(server.url())
            .chat_complete(vec![GenericMessage::user(PROMPT)])
            .await
            .unwrap_err();

        assert!(matches!(err, PipeError::Authentication { provider: "gemini", .. }));
    }

    #[tokio::test]
    async fn exhausted_quota_is_rate_limit() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .with_status(429)
            .with_header("retry-after", "3")
            .with_body(r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#)
            .expect(1)
            .create_async()
            .await;

        let err = adapter(server.url())
            .chat_complete(vec![GenericMessage::user(PROMPT)])
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(
            err,
            PipeError::RateLimitExceeded { retry_after: Some(d), .. } if d == Duration::from_secs(3)
        ));
    }

    #[tokio::test]
    async fn blocked_prompt_is_format_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
            .create_async()
            .await;

        let err = adapter(server.url())
            .chat_complete(vec![GenericMessage::user(PROMPT)])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipeError::Transport(TransportError::Format(ref m)) if m.contains("SAFETY")
        ));
    }

    #[tokio::test]
    async fn internal_error_is_transport_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(500)
            .with_body(r#"{"error":{"code":500,"message":"internal","status":"INTERNAL"}}"#)
            .create_async()
            .await;

        let err = adapter(server.url())
            .chat_complete(vec![GenericMessage::user(PROMPT)])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipeError::Transport(TransportError::Status { status: 500, .. })
        ));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn undecodable_body_is_format_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let err = adapter(server.url())
            .chat_complete(vec![GenericMessage::user(PROMPT)])
            .await
            .unwrap_err();

        assert!(matches!(err, PipeError::Transport(TransportError::Format(_))));
    }

    #[tokio::test]
    async fn unresponsive_server_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let adapter = GeminiAdapterBuilder::new()
            .with_api_key("g-key")
            .with_timeout(Duration::from_millis(200))
            .with_base_url(format!("http://{addr}"))
            .build()
            .unwrap();

        let err = adapter
            .chat_complete(vec![GenericMessage::user(PROMPT)])
            .await
            .unwrap_err();

        assert!(err.is_timeout(), "{err:?}");
        assert!(matches!(err, PipeError::Transport(TransportError::Timeout)));
    }
}
