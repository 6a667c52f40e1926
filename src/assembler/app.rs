use serde::{Deserialize, Serialize};

use super::{text, text_with, Clause, Layout, PromptFields, Section};
use crate::category::Category;
use crate::util::non_blank;

pub const DEFAULT_PRIMARY_COLOR: &str = "#3B82F6";
pub const DEFAULT_SECONDARY_COLOR: &str = "#F59E0B";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppFields {
    pub project_goal: String,
    pub project_name: String,
    pub target_audience: String,
    pub brand_personality: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub heading_font: String,
    pub body_font: String,
    pub headline: String,
    pub body_text: String,
    pub cta_text: String,
    pub features: Vec<String>,
}

impl Default for AppFields {
    fn default() -> Self {
        Self {
            project_goal: String::new(),
            project_name: String::new(),
            target_audience: String::new(),
            brand_personality: String::new(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
            heading_font: String::new(),
            body_font: String::new(),
            headline: String::new(),
            body_text: String::new(),
            cta_text: String::new(),
            features: Vec::new(),
        }
    }
}

fn entry(label: &str, value: &str) -> Option<String> {
    text_with(value, |v| format!("*   **{}:** {}", label, v))
}

fn quoted_entry(label: &str, value: &str) -> Option<String> {
    text_with(value, |v| format!("*   **{}:** \"{}\"", label, v))
}

fn feature_list(features: &[String]) -> Option<String> {
    let items: Vec<String> = features
        .iter()
        .filter_map(|f| non_blank(f))
        .map(|f| format!("    *   {}", f))
        .collect();
    if items.is_empty() {
        return None;
    }
    Some(format!(
        "*   **Features/Items List:**\n{}",
        items.join("\n")
    ))
}

impl PromptFields for AppFields {
    const CATEGORY: Category = Category::App;

    fn core(&self) -> &str {
        &self.project_goal
    }

    fn core_mut(&mut self) -> &mut String {
        &mut self.project_goal
    }

    fn layout() -> Layout<Self> {
        Layout::Sections(vec![
            Section {
                heading: "Task",
                clauses: vec![Clause::new("project_goal", |f: &Self| text(&f.project_goal))],
            },
            Section {
                heading: "Project Foundation",
                clauses: vec![
                    Clause::new("project_name", |f: &Self| {
                        entry("Project Name", &f.project_name)
                    }),
                    Clause::new("target_audience", |f: &Self| {
                        entry("Target Audience", &f.target_audience)
                    }),
                    Clause::new("brand_personality", |f: &Self| {
                        entry("Brand Personality", &f.brand_personality)
                    }),
                ],
            },
            Section {
                heading: "Design System",
                clauses: vec![
                    Clause::new("primary_color", |f: &Self| {
                        entry("Primary Color", &f.primary_color)
                    }),
                    Clause::new("secondary_color", |f: &Self| {
                        entry("Secondary Color", &f.secondary_color)
                    }),
                    Clause::new("heading_font", |f: &Self| {
                        entry("Heading Font", &f.heading_font)
                    }),
                    Clause::new("body_font", |f: &Self| entry("Body Font", &f.body_font)),
                ],
            },
            Section {
                heading: "Content & Components",
                clauses: vec![
                    Clause::new("headline", |f: &Self| quoted_entry("Headline", &f.headline)),
                    Clause::new("body_text", |f: &Self| {
                        quoted_entry("Body Text", &f.body_text)
                    }),
                    Clause::new("cta_text", |f: &Self| {
                        quoted_entry("Call-to-Action Text", &f.cta_text)
                    }),
                    Clause::new("features", |f: &Self| feature_list(&f.features)),
                ],
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::assemble;

    #[test]
    fn test_defaults_emit_design_system() {
        let fields = AppFields {
            project_goal: "A homepage for a coffee shop".into(),
            ..Default::default()
        };
        assert_eq!(
            assemble(&fields),
            "**Task:**\nA homepage for a coffee shop\n\n\
             **Design System:**\n\
             *   **Primary Color:** #3B82F6\n\
             *   **Secondary Color:** #F59E0B"
        );
    }

    #[test]
    fn test_full_app_prompt() {
        let fields = AppFields {
            project_goal: "A homepage for a coffee shop".into(),
            project_name: "Cozy Corner Cafe".into(),
            target_audience: "Local students".into(),
            brand_personality: "Friendly & Welcoming".into(),
            heading_font: "Poppins".into(),
            body_font: "Inter".into(),
            headline: "Your Daily Dose".into(),
            body_text: "Hand-roasted coffee".into(),
            cta_text: "View Our Menu".into(),
            features: vec!["Free Wi-Fi".into(), "Cozy Ambiance".into()],
            ..Default::default()
        };
        let expected = "**Task:**\nA homepage for a coffee shop\n\n\
**Project Foundation:**\n\
*   **Project Name:** Cozy Corner Cafe\n\
*   **Target Audience:** Local students\n\
*   **Brand Personality:** Friendly & Welcoming\n\n\
**Design System:**\n\
*   **Primary Color:** #3B82F6\n\
*   **Secondary Color:** #F59E0B\n\
*   **Heading Font:** Poppins\n\
*   **Body Font:** Inter\n\n\
**Content & Components:**\n\
*   **Headline:** \"Your Daily Dose\"\n\
*   **Body Text:** \"Hand-roasted coffee\"\n\
*   **Call-to-Action Text:** \"View Our Menu\"\n\
*   **Features/Items List:**\n    *   Free Wi-Fi\n    *   Cozy Ambiance";
        assert_eq!(assemble(&fields), expected);
    }

    #[test]
    fn test_blank_features_are_skipped() {
        assert_eq!(feature_list(&[" ".to_string()]), None);
        assert_eq!(
            feature_list(&["Menu".to_string()]).as_deref(),
            Some("*   **Features/Items List:**\n    *   Menu")
        );
    }
}
