//! Prompt assembly: one generic engine driven by per-category schemas.
//!
//! A schema is an ordered list of clauses. Each clause looks at one field
//! and either renders a piece of text or nothing. Clause order is the output
//! order, whatever order the fields were filled in.

pub mod app;
pub mod catalog;
pub mod image;
pub mod music;
pub mod video;

use anyhow::{bail, Result};

use crate::category::Category;
use crate::util::non_blank;

pub use app::AppFields;
pub use image::ImageFields;
pub use music::MusicFields;
pub use video::VideoFields;

/// Renders one field of `F`, or `None` when the field is empty.
pub struct Clause<F> {
    pub key: &'static str,
    pub render: fn(&F) -> Option<String>,
}

impl<F> Clause<F> {
    pub fn new(key: &'static str, render: fn(&F) -> Option<String>) -> Self {
        Self { key, render }
    }
}

/// A labeled group of clauses, rendered as `**Heading:**` plus one line per
/// non-empty clause.
pub struct Section<F> {
    pub heading: &'static str,
    pub clauses: Vec<Clause<F>>,
}

pub enum Layout<F> {
    /// Clauses joined on one line by `separator`
    Inline {
        separator: &'static str,
        clauses: Vec<Clause<F>>,
    },
    /// Labeled sections separated by a blank line; empty sections are dropped
    Sections(Vec<Section<F>>),
}

impl<F> Layout<F> {
    /// Clause keys in output order
    pub fn keys(&self) -> Vec<&'static str> {
        match self {
            Layout::Inline { clauses, .. } => clauses.iter().map(|c| c.key).collect(),
            Layout::Sections(sections) => sections
                .iter()
                .flat_map(|s| s.clauses.iter().map(|c| c.key))
                .collect(),
        }
    }
}

/// A category's field set.
pub trait PromptFields: Sized {
    const CATEGORY: Category;

    /// The field that must be filled before generating
    fn core(&self) -> &str;

    fn core_mut(&mut self) -> &mut String;

    fn layout() -> Layout<Self>;

    /// Reject values outside what the builder accepts.
    fn check(&self) -> Result<()> {
        Ok(())
    }

    fn has_core(&self) -> bool {
        non_blank(self.core()).is_some()
    }

    /// Append a section marker such as `[Chorus]` to the core text.
    fn insert_structure_tag(&mut self, tag: &str) -> Result<()> {
        bail!("{} prompts do not take structure tags (got {})", Self::CATEGORY, tag)
    }
}

/// Fold a field set into its prompt text. Never fails.
pub fn assemble<F: PromptFields>(fields: &F) -> String {
    match F::layout() {
        Layout::Inline { separator, clauses } => render_clauses(&clauses, fields).join(separator),
        Layout::Sections(sections) => sections
            .iter()
            .filter_map(|section| {
                let lines = render_clauses(&section.clauses, fields);
                if lines.is_empty() {
                    None
                } else {
                    Some(format!("**{}:**\n{}", section.heading, lines.join("\n")))
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

fn render_clauses<F>(clauses: &[Clause<F>], fields: &F) -> Vec<String> {
    clauses.iter().filter_map(|c| (c.render)(fields)).collect()
}

/// Field text as-is, when present
pub(crate) fn text(value: &str) -> Option<String> {
    non_blank(value).map(str::to_string)
}

/// Field text wrapped by `wrap`, when present
pub(crate) fn text_with(value: &str, wrap: impl Fn(&str) -> String) -> Option<String> {
    non_blank(value).map(wrap)
}
