//! Multi-message chat template.
//!
//! ```text
//! ┌──────────────────────────────┐   format_messages   ┌────────────────┐
//! │ (System, "You are {style}")  │ ──────────────────► │ GenericMessage │
//! ├──────────────────────────────┤                     ├────────────────┤
//! │ (User,   "Tell me … {name}") │ ──────────────────► │ GenericMessage │
//! └──────────────────────────────┘                     └────────────────┘
//!                       all rendered with the same Variables
//! ```
//!
//! ```rust
//! use promptpipe_core::generic::GenericRole;
//! use promptpipe_prompt::{ChatPromptTemplate, Variables};
//!
//! let chat = ChatPromptTemplate::from_messages([
//!     (GenericRole::System, "You answer in {language}."),
//!     (GenericRole::User, "Tell me a few achievements of {name}"),
//! ])
//! .unwrap();
//!
//! let prompt = chat
//!     .format_messages(&Variables::from([("language", "French"), ("name", "Marie Curie")]))
//!     .unwrap();
//! assert_eq!(prompt.messages().len(), 2);
//! ```
use promptpipe_core::{
    BoxFuture,
    error::Result,
    generic::{GenericMessage, GenericRole, RenderedPrompt},
    pipeline::Stage,
};

use crate::{PromptTemplate, Variables};

/// Ordered list of role-tagged [`PromptTemplate`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPromptTemplate {
    messages: Vec<(GenericRole, PromptTemplate)>,
}

impl ChatPromptTemplate {
    /// A chat consisting of one user message.
    pub fn from_template(template: impl Into<String>) -> Result<Self> {
        Self::from_messages([(GenericRole::User, template)])
    }

    pub fn from_messages<I, S>(messages: I) -> Result<Self>
    where
        I: IntoIterator<Item = (GenericRole, S)>,
        S: Into<String>,
    {
        let messages = messages
            .into_iter()
            .map(|(role, template)| -> Result<_> {
                Ok((role, PromptTemplate::from_template(template)?))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { messages })
    }

    /// Append one more message template.
    pub fn with_message(mut self, role: GenericRole, template: impl Into<String>) -> Result<Self> {
        self.messages
            .push((role, PromptTemplate::from_template(template)?));
        Ok(self)
    }

    /// Distinct placeholder names across all messages, in order of first
    /// appearance.
    pub fn input_variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.messages.iter().flat_map(|(_, t)| t.input_variables()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Render every message with the same `variables`.
    pub fn format_messages(&self, variables: &Variables) -> Result<RenderedPrompt> {
        self.messages
            .iter()
            .map(|(role, template)| -> Result<_> {
                Ok(GenericMessage::new(template.format(variables)?, *role))
            })
            .collect::<Result<Vec<_>>>()
            .map(RenderedPrompt::new)
    }
}

impl From<PromptTemplate> for ChatPromptTemplate {
    fn from(value: PromptTemplate) -> Self {
        Self {
            messages: vec![(GenericRole::User, value)],
        }
    }
}

impl Stage<Variables> for ChatPromptTemplate {
    type Output = RenderedPrompt;

    fn run(&self, input: Variables) -> BoxFuture<'_, Result<RenderedPrompt>> {
        let rendered = self.format_messages(&input);
        Box::pin(async move { rendered })
    }
}
