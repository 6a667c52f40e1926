use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Image,
    Video,
    Music,
    App,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Image,
        Category::Video,
        Category::Music,
        Category::App,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Image => "image",
            Category::Video => "video",
            Category::Music => "music",
            Category::App => "app",
        }
    }

    /// Default number of generations a user gets per day.
    /// The backend enforces its own values; these seed local stores.
    pub fn daily_allotment(&self) -> u32 {
        match self {
            Category::Image => 10,
            Category::Video => 4,
            Category::Music => 5,
            Category::App => 3,
        }
    }

    /// Column name of this category's counter in the `profiles` table
    pub fn profile_column(&self) -> &'static str {
        match self {
            Category::Image => "daily_image_count",
            Category::Video => "daily_video_count",
            Category::Music => "daily_music_count",
            Category::App => "daily_app_count",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "image" | "img" => Ok(Category::Image),
            "video" | "vid" => Ok(Category::Video),
            "music" | "song" | "audio" => Ok(Category::Music),
            "app" | "app-builder" => Ok(Category::App),
            _ => bail!("Unknown category: {}", s),
        }
    }
}
