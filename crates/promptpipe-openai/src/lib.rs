//! OpenAI *chat/completions* backend for **promptpipe**.
//!
//! Build an [`OpenAiAdapter`] with [`OpenAiAdapterBuilder`] and hand it to a
//! [`promptpipe_core::ModelClient`].
mod adapter;
mod model_map;
mod provider_impl_chat;

pub use adapter::{API_KEY_ENV, OpenAiAdapter, OpenAiAdapterBuilder, TEMPERATURE_RANGE};
pub use client::OpenAiClient;
pub mod api_v1;
mod client;
pub mod error;

/// Provider name used in errors and logs.
pub const PROVIDER: &str = "openai";
