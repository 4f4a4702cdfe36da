//! # `promptpipe` – The umbrella crate
//!
//! One-stop import for the workspace:
//!
//! | Crate                   | What it provides                                                          |
//! |-------------------------|---------------------------------------------------------------------------|
//! | **`promptpipe-core`**   | Errors, generic messages, `ModelConfig`, `ChatCompletionProvider`, `Stage`/`Pipeline` |
//! | **`promptpipe-prompt`** | `PromptTemplate`, `ChatPromptTemplate`, `Variables`                        |
//! | **`promptpipe-openai`** | OpenAI *chat/completions* backend *(feature `openai`)*                    |
//! | **`promptpipe-gemini`** | Gemini *generateContent* backend *(feature `gemini`)*                     |
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use promptpipe::{
//!     ModelClient,
//!     config::ModelConfig,
//!     model::OpenAiModel,
//!     openai::OpenAiAdapter,
//!     pipeline::StageExt,
//!     prompt::{PromptTemplate, Variables},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ModelConfig::new(OpenAiModel::Gpt35Turbo, std::env::var("OPENAI_API_KEY")?)
//!         .with_temperature(0.5);
//!
//!     let pipeline = PromptTemplate::from_template("Tell me a few achievements of {name}")?
//!         .pipe(ModelClient::new(OpenAiAdapter::from_config(config)?));
//!
//!     let response = pipeline
//!         .invoke(Variables::new().with("name", "Barack Obama"))
//!         .await?;
//!     println!("{}", response.text);
//!     Ok(())
//! }
//! ```
#[cfg(not(any(feature = "openai", feature = "gemini")))]
compile_error!("enable at least one provider feature: `openai` or `gemini`");

pub mod backend;

pub use backend::{AnyBackend, Provider};
pub use promptpipe_core::*;
pub use promptpipe_prompt as prompt;

#[cfg(feature = "gemini")]
pub use promptpipe_gemini as gemini;
#[cfg(feature = "openai")]
pub use promptpipe_openai as openai;
