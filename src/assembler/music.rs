use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::{text, text_with, Clause, Layout, PromptFields};
use crate::category::Category;
use crate::util::join_tags;

pub const TEMPO_MIN: u32 = 60;
pub const TEMPO_MAX: u32 = 180;
pub const DEFAULT_TEMPO: u32 = 120;

/// Section markers Suno-style tools read from lyrics
pub const STRUCTURE_TAGS: &[&str] = &["[Verse]", "[Chorus]", "[Bridge]", "[Guitar Solo]", "[Hook]"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicFields {
    pub core_idea: String,
    pub genres: Vec<String>,
    pub era_influence: Vec<String>,
    pub moods: Vec<String>,
    pub instrumentation: Vec<String>,
    pub vocal_style: String,
    /// Beats per minute; always part of the prompt
    pub tempo: u32,
}

impl Default for MusicFields {
    fn default() -> Self {
        Self {
            core_idea: String::new(),
            genres: Vec::new(),
            era_influence: Vec::new(),
            moods: Vec::new(),
            instrumentation: Vec::new(),
            vocal_style: String::new(),
            tempo: DEFAULT_TEMPO,
        }
    }
}

impl PromptFields for MusicFields {
    const CATEGORY: Category = Category::Music;

    fn core(&self) -> &str {
        &self.core_idea
    }

    fn core_mut(&mut self) -> &mut String {
        &mut self.core_idea
    }

    fn layout() -> Layout<Self> {
        Layout::Inline {
            separator: ", ",
            clauses: vec![
                Clause::new("core_idea", |f: &Self| text(&f.core_idea)),
                Clause::new("genres", |f: &Self| {
                    join_tags(&f.genres).map(|s| format!("Genre: {}", s))
                }),
                Clause::new("era_influence", |f: &Self| {
                    join_tags(&f.era_influence).map(|s| format!("Style: {}", s))
                }),
                Clause::new("moods", |f: &Self| {
                    join_tags(&f.moods).map(|s| format!("Mood: {}", s))
                }),
                Clause::new("instrumentation", |f: &Self| {
                    join_tags(&f.instrumentation).map(|s| format!("Instruments: {}", s))
                }),
                Clause::new("vocal_style", |f: &Self| {
                    text_with(&f.vocal_style, |v| format!("Vocals: {}", v))
                }),
                Clause::new("tempo", |f: &Self| Some(format!("Tempo: {} BPM", f.tempo))),
            ],
        }
    }

    // Each tag goes on its own line, like lyrics.
    fn insert_structure_tag(&mut self, tag: &str) -> Result<()> {
        let tag = tag.trim();
        if !STRUCTURE_TAGS.contains(&tag) {
            bail!(
                "Unknown structure tag: {} (expected one of {})",
                tag,
                STRUCTURE_TAGS.join(", ")
            );
        }
        if !self.core_idea.is_empty() {
            self.core_idea.push('\n');
        }
        self.core_idea.push_str(tag);
        self.core_idea.push('\n');
        Ok(())
    }

    fn check(&self) -> Result<()> {
        if !(TEMPO_MIN..=TEMPO_MAX).contains(&self.tempo) {
            bail!(
                "Tempo {} BPM is outside {}-{} BPM",
                self.tempo,
                TEMPO_MIN,
                TEMPO_MAX
            );
        }
        Ok(())
    }
}
