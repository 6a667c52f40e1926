//! Identity and cached quota profile types

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::util::SecretString;

/// An authenticated user as handed out by the session provider.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    access_token: SecretString,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            access_token: SecretString::new(access_token.into()),
        }
    }

    pub fn access_token(&self) -> &SecretString {
        &self.access_token
    }
}

// Two handles are the same identity when they name the same user; a token
// refresh does not make it a different session.
impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.user_id == other.user_id
    }
}

impl Eq for Identity {}

/// Remaining generations per category, keyed by the closed `Category` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuotaCounts {
    pub image: u32,
    pub video: u32,
    pub music: u32,
    pub app: u32,
}

impl QuotaCounts {
    /// Full daily allotment for every category
    pub fn full() -> Self {
        let mut counts = Self::default();
        for category in Category::ALL {
            counts.set(category, category.daily_allotment());
        }
        counts
    }

    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Image => self.image,
            Category::Video => self.video,
            Category::Music => self.music,
            Category::App => self.app,
        }
    }

    pub fn set(&mut self, category: Category, value: u32) {
        let slot = match category {
            Category::Image => &mut self.image,
            Category::Video => &mut self.video,
            Category::Music => &mut self.music,
            Category::App => &mut self.app,
        };
        *slot = value;
    }
}

/// Local mirror of a user's `profiles` row. The store owns the real values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Profile {
    pub username: Option<String>,
    pub counts: QuotaCounts,
}

impl Profile {
    pub fn new(counts: QuotaCounts) -> Self {
        Self {
            username: None,
            counts,
        }
    }

    pub fn remaining(&self, category: Category) -> u32 {
        self.counts.get(category)
    }
}

/// Wire shape of a row in the `profiles` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub daily_image_count: i64,
    #[serde(default)]
    pub daily_video_count: i64,
    #[serde(default)]
    pub daily_music_count: i64,
    #[serde(default)]
    pub daily_app_count: i64,
}

fn clamp_count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            username: row.username,
            counts: QuotaCounts {
                image: clamp_count(row.daily_image_count),
                video: clamp_count(row.daily_video_count),
                music: clamp_count(row.daily_music_count),
                app: clamp_count(row.daily_app_count),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_get_set_by_category() {
        let mut counts = QuotaCounts::default();
        counts.set(Category::Music, 3);
        assert_eq!(counts.get(Category::Music), 3);
        assert_eq!(counts.get(Category::Image), 0);
    }

    #[test]
    fn test_full_counts_match_allotments() {
        let counts = QuotaCounts::full();
        for category in Category::ALL {
            assert_eq!(counts.get(category), category.daily_allotment());
        }
    }

    #[test]
    fn test_profile_row_parsing() {
        let json = r#"{
            "id": "8c1d",
            "username": "ada",
            "daily_image_count": 7,
            "daily_video_count": 4,
            "daily_music_count": 0,
            "daily_app_count": 2,
            "created_at": "2025-01-01T00:00:00Z"
        }"#;
        let row: ProfileRow = serde_json::from_str(json).unwrap();
        let profile = Profile::from(row);
        assert_eq!(profile.username.as_deref(), Some("ada"));
        assert_eq!(profile.remaining(Category::Image), 7);
        assert_eq!(profile.remaining(Category::Music), 0);
        assert_eq!(profile.remaining(Category::App), 2);
    }

    #[test]
    fn test_negative_counts_clamp_to_zero() {
        let row: ProfileRow = serde_json::from_str(r#"{"daily_video_count": -2}"#).unwrap();
        let profile = Profile::from(row);
        assert_eq!(profile.remaining(Category::Video), 0);
    }

    #[test]
    fn test_identity_equality_ignores_token() {
        let a = Identity::new("user-1", "token-a");
        let b = Identity::new("user-1", "token-b");
        let c = Identity::new("user-2", "token-a");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_identity_debug_hides_token() {
        let identity = Identity::new("user-1", "super-secret");
        let debug = format!("{:?}", identity);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("user-1"));
    }
}
