use serde::{Deserialize, Serialize};

use super::{text, text_with, Clause, Layout, PromptFields};
use crate::category::Category;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoFields {
    pub core_scene: String,
    pub key_subjects: String,
    pub core_action: String,
    pub visual_style: String,
    pub lighting_mood: String,
    pub color_palette: String,
    pub camera_perspective: String,
    pub camera_movement: String,
    pub lens_shot: String,
    pub pace_speed: String,
}

impl PromptFields for VideoFields {
    const CATEGORY: Category = Category::Video;

    fn core(&self) -> &str {
        &self.core_scene
    }

    fn core_mut(&mut self) -> &mut String {
        &mut self.core_scene
    }

    fn layout() -> Layout<Self> {
        Layout::Inline {
            separator: ", ",
            clauses: vec![
                Clause::new("core_scene", |f: &Self| text(&f.core_scene)),
                Clause::new("key_subjects", |f: &Self| {
                    text_with(&f.key_subjects, |v| format!("featuring {}", v))
                }),
                Clause::new("core_action", |f: &Self| text(&f.core_action)),
                Clause::new("visual_style", |f: &Self| {
                    text_with(&f.visual_style, |v| format!("{} style", v))
                }),
                Clause::new("lighting_mood", |f: &Self| {
                    text_with(&f.lighting_mood, |v| format!("{} lighting", v.to_lowercase()))
                }),
                Clause::new("color_palette", |f: &Self| {
                    text_with(&f.color_palette, |v| format!("{} colors", v.to_lowercase()))
                }),
                Clause::new("camera_perspective", |f: &Self| {
                    text_with(&f.camera_perspective, |v| {
                        format!("shot from {}", v.to_lowercase())
                    })
                }),
                Clause::new("camera_movement", |f: &Self| {
                    text_with(&f.camera_movement, str::to_lowercase)
                }),
                Clause::new("lens_shot", |f: &Self| {
                    text_with(&f.lens_shot, |v| format!("using {}", v.to_lowercase()))
                }),
                Clause::new("pace_speed", |f: &Self| {
                    text_with(&f.pace_speed, |v| format!("{} pace", v.to_lowercase()))
                }),
            ],
        }
    }
}
