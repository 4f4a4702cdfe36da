//! Prompt templates for **promptpipe**.
//!
//! * [`PromptTemplate`] – one text template with `{name}` placeholders.
//! * [`ChatPromptTemplate`] – several role-tagged templates rendered together.
//! * [`Variables`] – the per-invocation placeholder values.
//!
//! Both templates implement [`Stage<Variables>`](promptpipe_core::pipeline::Stage)
//! and produce a [`RenderedPrompt`](promptpipe_core::generic::RenderedPrompt),
//! ready to be piped into a model client.
pub mod chat;
pub mod template;
mod variables;

pub use chat::ChatPromptTemplate;
pub use template::{PromptTemplate, render};
pub use variables::Variables;
