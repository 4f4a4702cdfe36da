use promptpipe_core::{
    BoxFuture,
    config::ModelConfig,
    error::Result,
    generic::{ChatResponse, GenericMessage},
    provider::ChatCompletionProvider,
};

use crate::{PROVIDER, OpenAiAdapter, api_v1::ChatCompletionRequest, error::OpenAiError};

impl ChatCompletionProvider for OpenAiAdapter {
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
            let request = ChatCompletionRequest::from_config(&self.config, messages)?;

            #[cfg(feature = "tracing")]
            tracing::debug!(
                model = %request.model,
                messages = request.messages.len(),
                "sending OpenAI chat completion"
            );

            let (response, raw) = self
                .client
                .chat_completion(&request, self.config.timeout())
                .await?;

            #[cfg(feature = "tracing")]
            if let Some(usage) = &response.usage {
                tracing::debug!(
                    prompt_tokens = usage.prompt_tokens,
                    completion_tokens = usage.completion_tokens,
                    "OpenAI chat completion finished"
                );
            }

            let usage = response.usage.map(Into::into);
            let model = response.model;

            let Some(choice) = response.choices.into_iter().min_by_key(|c| c.index) else {
                return Err(OpenAiError::Format("response has no choices".into()).into());
            };

            let Some(text) = choice.message.content else {
                let reason = choice
                    .message
                    .refusal
                    .unwrap_or_else(|| "assistant message has no content".into());
                return Err(OpenAiError::Format(reason).into());
            };

            Ok(ChatResponse {
                text,
                model,
                finish_reason: choice.finish_reason,
                usage,
                raw,
            })
        })
    }
}
