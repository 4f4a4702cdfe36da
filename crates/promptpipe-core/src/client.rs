//! Generic, lightweight client that sends a [`RenderedPrompt`] to a single
//! concrete [`ChatCompletionProvider`].
//!
//! The client is **generic over the backend type `B`**, so there is no
//! dynamic dispatch in user code, and it implements [`Stage`] so it can sit
//! at the end of a [`Pipeline`](crate::pipeline::Pipeline).
//!
//! ```rust
//! use promptpipe_core::{
//!     BoxFuture, ModelClient,
//!     config::ModelConfig,
//!     error::Result,
//!     generic::{ChatResponse, GenericMessage},
//!     model::OpenAiModel,
//!     provider::ChatCompletionProvider,
//! };
//!
//! struct Echo(ModelConfig);
//!
//! impl ChatCompletionProvider for Echo {
//!     fn provider_name(&self) -> &'static str { "echo" }
//!     fn config(&self) -> &ModelConfig { &self.0 }
//!     fn chat_complete<'p>(&'p self, messages: Vec<GenericMessage>)
//!         -> BoxFuture<'p, Result<ChatResponse>>
//!     {
//!         Box::pin(async move { Ok(ChatResponse::from_text(messages[0].content.clone())) })
//!     }
//! }
//!
//! let client = ModelClient::new(Echo(ModelConfig::new(OpenAiModel::Gpt4o, "sk")));
//! assert_eq!(client.backend().provider_name(), "echo");
//! ```
use std::sync::Arc;

use crate::{
    error::{PipeError, Result},
    generic::{ChatResponse, RenderedPrompt},
    pipeline::Stage,
    provider::ChatCompletionProvider,
    BoxFuture,
};

/// A client bound to a single provider and, through it, a single
/// [`ModelConfig`](crate::config::ModelConfig).
///
/// Cloning is cheap; the backend sits behind an `Arc`.
#[derive(Debug)]
pub struct ModelClient<B> {
    backend: Arc<B>,
}

impl<B> Clone for ModelClient<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B> ModelClient<B>
where
    B: ChatCompletionProvider,
{
    /// Create a new client that delegates all calls to `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Access the underlying backend (e.g. to inspect its configuration).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Send `prompt` and return the provider's reply.
    ///
    /// Exactly one backend call per invocation. Blank prompts are rejected
    /// before reaching the backend.
    pub async fn invoke(&self, prompt: impl Into<RenderedPrompt>) -> Result<ChatResponse> {
        let prompt = prompt.into();
        if prompt.is_empty() {
            return Err(PipeError::InvalidRequest("prompt must not be empty".into()));
        }

        self.backend.chat_complete(prompt.into_messages()).await
    }
}

impl<B> Stage<RenderedPrompt> for ModelClient<B>
where
    B: ChatCompletionProvider,
{
    type Output = ChatResponse;

    fn run(&self, input: RenderedPrompt) -> BoxFuture<'_, Result<ChatResponse>> {
        Box::pin(self.invoke(input))
    }
}
