//! Provider-agnostic building blocks for **promptpipe**: the error taxonomy,
//! generic message types, model configuration, the
//! [`ChatCompletionProvider`](provider::ChatCompletionProvider) backend trait
//! and the [`Stage`](pipeline::Stage) / [`Pipeline`](pipeline::Pipeline)
//! composition.
use std::{future::Future, pin::Pin};

pub mod client;
pub mod config;
pub mod error;
pub mod generic;
pub mod model;
pub mod pipeline;
pub mod provider;

pub use client::ModelClient;

/// Boxed, `Send` future returned by every backend and stage.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
