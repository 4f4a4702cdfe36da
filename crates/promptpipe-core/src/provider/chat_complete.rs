use crate::{
    config::ModelConfig,
    error::Result,
    generic::{ChatResponse, GenericMessage},
    BoxFuture,
};

/// A **backend** turns chat messages into a network call to a concrete
/// provider (OpenAI, Gemini, …) and extracts the generated text.
///
/// The trait is intentionally minimal:
///
/// * **One method** – `chat_complete`, which performs a *single*
///   non-streaming round-trip. No retries, no caching.
/// * Model, credential and temperature are fixed when the backend is built,
///   so every call made through the same backend uses the same
///   [`ModelConfig`].
///
/// The method returns a boxed future so the trait stays object-safe without
/// pulling in `async_trait`.
pub trait ChatCompletionProvider: Send + Sync {
    /// Short provider name used in errors and logs (`"openai"`, `"gemini"`).
    fn provider_name(&self) -> &'static str;

    /// Configuration the backend was built with.
    fn config(&self) -> &ModelConfig;

    /// Send `messages` and return the provider's single reply.
    fn chat_complete<'p>(
        &'p self,
        messages: Vec<GenericMessage>,
    ) -> BoxFuture<'p, Result<ChatResponse>>;
}

impl<B: ChatCompletionProvider + ?Sized> ChatCompletionProvider for std::sync::Arc<B> {
    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn config(&self) -> &ModelConfig {
        (**self).config()
    }

    fn chat_complete<'p>(
        &'p self,
        messages: Vec<GenericMessage>,
    ) -> BoxFuture<'p, Result<ChatResponse>> {
        (**self).chat_complete(messages)
    }
}
