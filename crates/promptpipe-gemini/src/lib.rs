//! Google Gemini *generateContent* backend for **promptpipe**.
//!
//! Build a [`GeminiAdapter`] with [`GeminiAdapterBuilder`] and hand it to a
//! [`promptpipe_core::ModelClient`].
mod adapter;
mod model_map;
mod provider_impl_generate;

pub use adapter::{API_KEY_ENVS, GeminiAdapter, GeminiAdapterBuilder, TEMPERATURE_RANGE};
pub use client::GeminiClient;
pub mod api_v1;
mod client;
pub mod error;

/// Provider name used in errors and logs.
pub const PROVIDER: &str = "gemini";
