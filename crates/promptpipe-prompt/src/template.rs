//! Single-message prompt template with `{name}` placeholders.
//!
//! The template is parsed once, at construction. Rendering is then a plain
//! walk over literal and placeholder segments; substituted values are
//! inserted verbatim and never parsed again.
//!
//! Syntax:
//!
//! * `{name}` – placeholder; `name` is the text between the braces.
//! * `{{` / `}}` – a literal `{` / `}`.
//! * Anything else is copied as-is.
//!
//! ```rust
//! use promptpipe_prompt::{PromptTemplate, Variables};
//!
//! let template = PromptTemplate::from_template("Tell me a few achievements of {name}").unwrap();
//! let text = template.format(&Variables::new().with("name", "Barack Obama")).unwrap();
//!
//! assert_eq!(text, "Tell me a few achievements of Barack Obama");
//! ```
use promptpipe_core::{
    BoxFuture,
    error::{PipeError, Result},
    generic::RenderedPrompt,
    pipeline::Stage,
};

use crate::Variables;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// An immutable, pre-parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parse `template`.
    ///
    /// # Errors
    ///
    /// * [`PipeError::InvalidTemplate`] – unclosed `{`, stray `}` or an empty
    ///   `{}` placeholder.
    pub fn from_template(template: impl Into<String>) -> Result<Self> {
        let source = template.into();
        let segments = parse(&source)?;
        Ok(Self { source, segments })
    }

    /// The template text as given.
    pub fn template(&self) -> &str {
        &self.source
    }

    /// Distinct placeholder names, in order of first appearance.
    pub fn input_variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Variable(name) = segment {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Substitute every placeholder with its value from `variables`.
    ///
    /// Entries in `variables` that the template does not reference are
    /// ignored.
    ///
    /// # Errors
    ///
    /// * [`PipeError::MissingVariable`] – naming the first placeholder without
    ///   a value.
    pub fn format(&self, variables: &Variables) -> Result<String> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Variable(name) => {
                    let value = variables
                        .get(name)
                        .ok_or_else(|| PipeError::MissingVariable { name: name.clone() })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    /// Render into a prompt holding one user message.
    pub fn format_prompt(&self, variables: &Variables) -> Result<RenderedPrompt> {
        self.format(variables).map(RenderedPrompt::from)
    }
}

/// Parse `template` and render it in one go.
pub fn render(template: &str, variables: &Variables) -> Result<String> {
    PromptTemplate::from_template(template)?.format(variables)
}

impl Stage<Variables> for PromptTemplate {
    type Output = RenderedPrompt;

    fn run(&self, input: Variables) -> BoxFuture<'_, Result<RenderedPrompt>> {
        let rendered = self.format_prompt(&input);
        Box::pin(async move { rendered })
    }
}

fn parse(template: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                literal.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, '{')) | None => {
                            return Err(PipeError::InvalidTemplate(format!(
                                "unclosed `{{` at byte {pos}"
                            )));
                        }
                        Some((_, c)) => name.push(c),
                    }
                }

                if name.trim().is_empty() {
                    return Err(PipeError::InvalidTemplate(format!(
                        "empty placeholder at byte {pos}"
                    )));
                }

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Variable(name));
            }
            '}' => {
                return Err(PipeError::InvalidTemplate(format!(
                    "unmatched `}}` at byte {pos}"
                )));
            }
            c => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}
