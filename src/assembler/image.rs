use serde::{Deserialize, Serialize};

use super::{text, text_with, Clause, Layout, PromptFields};
use crate::category::Category;
use crate::util::join_tags;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageFields {
    pub core_idea: String,
    pub primary_subjects: Vec<String>,
    pub action_pose: Vec<String>,
    pub environment: String,
    pub primary_style: String,
    pub artist_reference: String,
    pub color_palette: String,
    pub lighting_style: String,
    pub camera_angle: String,
    /// Label such as "16:9 (Widescreen)"
    pub aspect_ratio: String,
    pub quality_enhancers: Vec<String>,
}

/// "16:9 (Widescreen)" -> "16:9"
fn ratio_value(label: &str) -> &str {
    label.split(' ').next().unwrap_or(label)
}

impl PromptFields for ImageFields {
    const CATEGORY: Category = Category::Image;

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
                Clause::new("primary_subjects", |f: &Self| {
                    join_tags(&f.primary_subjects).map(|s| format!("featuring {}", s))
                }),
                Clause::new("action_pose", |f: &Self| join_tags(&f.action_pose)),
                Clause::new("environment", |f: &Self| {
                    text_with(&f.environment, |v| format!("in {}", v))
                }),
                Clause::new("primary_style", |f: &Self| {
                    text_with(&f.primary_style, |v| format!("{} style", v))
                }),
                Clause::new("artist_reference", |f: &Self| {
                    text_with(&f.artist_reference, |v| format!("in the style of {}", v))
                }),
                Clause::new("color_palette", |f: &Self| {
                    text_with(&f.color_palette, |v| {
                        format!("{} color palette", v.to_lowercase())
                    })
                }),
                Clause::new("lighting_style", |f: &Self| {
                    text_with(&f.lighting_style, str::to_lowercase)
                }),
                Clause::new("camera_angle", |f: &Self| {
                    text_with(&f.camera_angle, str::to_lowercase)
                }),
                Clause::new("aspect_ratio", |f: &Self| {
                    text_with(&f.aspect_ratio, |v| format!("--ar {}", ratio_value(v)))
                }),
                Clause::new("quality_enhancers", |f: &Self| join_tags(&f.quality_enhancers)),
            ],
        }
    }
}
