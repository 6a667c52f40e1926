//! Choices offered by each builder: target platforms and preset options.

use super::music::STRUCTURE_TAGS;
use crate::category::Category;

pub struct OptionGroup {
    pub field: &'static str,
    pub label: &'static str,
    pub choices: &'static [&'static str],
}

pub struct Catalog {
    pub category: Category,
    pub platforms: &'static [&'static str],
    pub groups: &'static [OptionGroup],
}

impl Catalog {
    pub fn group(&self, field: &str) -> Option<&OptionGroup> {
        self.groups.iter().find(|g| g.field == field)
    }
}

static IMAGE: Catalog = Catalog {
    category: Category::Image,
    platforms: &["Midjourney", "DALL-E 3", "Stable Diffusion", "Ideogram", "Leonardo AI"],
    groups: &[
        OptionGroup {
            field: "primary_style",
            label: "Primary Style",
            choices: &[
                "Photorealistic",
                "Anime",
                "Oil Painting",
                "3D Render",
                "Watercolor",
                "Line Art",
                "Cyberpunk",
                "Steampunk",
            ],
        },
        OptionGroup {
            field: "artist_reference",
            label: "Artist Reference",
            choices: &[
                "Greg Rutkowski",
                "Alphonse Mucha",
                "Wes Anderson",
                "Hayao Miyazaki",
                "Van Gogh",
                "Picasso",
                "Monet",
            ],
        },
        OptionGroup {
            field: "color_palette",
            label: "Color Palette",
            choices: &[
                "Vibrant & Saturated",
                "Muted Earth Tones",
                "Monochrome",
                "Pastel Tones",
                "Neon",
            ],
        },
        OptionGroup {
            field: "lighting_style",
            label: "Lighting Style",
            choices: &[
                "Cinematic Lighting",
                "Golden Hour",
                "Studio Light",
                "Neon Glow",
                "Backlit",
                "Moody",
            ],
        },
        OptionGroup {
            field: "camera_angle",
            label: "Camera Angle",
            choices: &["Portrait", "Close-up", "Wide Shot", "Aerial View", "Low-Angle Shot"],
        },
        OptionGroup {
            field: "aspect_ratio",
            label: "Aspect Ratio",
            choices: &[
                "1:1 (Square)",
                "2:3 (Portrait)",
                "3:2 (Landscape)",
                "16:9 (Widescreen)",
            ],
        },
        OptionGroup {
            field: "quality_enhancers",
            label: "Quality Enhancers",
            choices: &["4K", "8K", "Highly Detailed", "Intricate Details", "UHD"],
        },
    ],
};

static VIDEO: Catalog = Catalog {
    category: Category::Video,
    platforms: &["Sora", "Google Veo", "Kling", "Runway Gen-3", "Pika"],
    groups: &[
        OptionGroup {
            field: "visual_style",
            label: "Visual Style",
            choices: &[
                "Cinematic",
                "Photorealistic",
                "3D Animation",
                "Vintage Film (1950s)",
                "Archival Footage",
                "Anime",
            ],
        },
        OptionGroup {
            field: "lighting_mood",
            label: "Lighting & Mood",
            choices: &[
                "Golden Hour",
                "Dramatic Contrast",
                "Neon Noir",
                "Eerie & Foggy",
                "Bright & Cheerful",
            ],
        },
        OptionGroup {
            field: "color_palette",
            label: "Color Palette",
            choices: &["Vibrant & Saturated", "Muted Earth Tones", "Monochrome", "Pastel"],
        },
        OptionGroup {
            field: "camera_perspective",
            label: "Camera Perspective",
            choices: &[
                "Eye-Level Shot",
                "Low-Angle Shot",
                "High-Angle Shot",
                "Aerial View",
                "Point of View (POV)",
            ],
        },
        OptionGroup {
            field: "camera_movement",
            label: "Camera Movement",
            choices: &[
                "Static Shot",
                "Slow Pan Left",
                "Rapid Tracking Shot",
                "Dolly Zoom",
                "Crane Shot",
            ],
        },
        OptionGroup {
            field: "lens_shot",
            label: "Lens & Shot Type",
            choices: &[
                "Wide Angle (24mm)",
                "Standard (50mm)",
                "Telephoto (135mm)",
                "Macro (Extreme Close-up)",
            ],
        },
        OptionGroup {
            field: "pace_speed",
            label: "Pace / Speed",
            choices: &["Real-time", "Slow Motion", "Time-lapse", "Fast-paced"],
        },
    ],
};

static MUSIC: Catalog = Catalog {
    category: Category::Music,
    platforms: &["Suno", "Udio", "Stable Audio", "Riffusion"],
    groups: &[
        OptionGroup {
            field: "genres",
            label: "Genre",
            choices: &[
                "Synthwave",
                "Lo-fi Hip Hop",
                "Epic Orchestral",
                "Folk",
                "Hard Rock",
                "Pop",
                "Jazz",
                "Blues",
            ],
        },
        OptionGroup {
            field: "moods",
            label: "Mood",
            choices: &[
                "Triumphant",
                "Melancholic",
                "Aggressive",
                "Peaceful",
                "Unsettling",
                "Romantic",
                "Energetic",
            ],
        },
        OptionGroup {
            field: "vocal_style",
            label: "Vocal Style",
            choices: &[
                "Male Vocal",
                "Female Vocal",
                "Instrumental",
                "Choir",
                "Rapping",
                "Whispered Vocals",
            ],
        },
        // Inserted into the core idea / lyrics rather than a field of their own
        OptionGroup {
            field: "core_idea",
            label: "Structure Tags",
            choices: STRUCTURE_TAGS,
        },
    ],
};

static APP: Catalog = Catalog {
    category: Category::App,
    platforms: &["Replit AI", "Bolt", "Lovable"],
    groups: &[
        OptionGroup {
            field: "brand_personality",
            label: "Brand Personality",
            choices: &[
                "Professional & Sleek",
                "Playful & Creative",
                "Minimalist & Modern",
                "Friendly & Welcoming",
            ],
        },
        OptionGroup {
            field: "heading_font",
            label: "Heading Font",
            choices: FONTS,
        },
        OptionGroup {
            field: "body_font",
            label: "Body Font",
            choices: FONTS,
        },
    ],
};

const FONTS: &[&str] = &[
    "Inter",
    "Poppins",
    "Roboto",
    "Lato",
    "Montserrat",
    "Open Sans",
    "Source Sans Pro",
];

pub fn catalog(category: Category) -> &'static Catalog {
    match category {
        Category::Image => &IMAGE,
        Category::Video => &VIDEO,
        Category::Music => &MUSIC,
        Category::App => &APP,
    }
}
