//! Theme identifiers and their color palettes.

use serde::{Deserialize, Serialize};

/// Built-in slide themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Plain light theme.
    #[default]
    Default,
    /// Dark, high-contrast theme.
    Gaia,
    /// Light theme with a blue accent.
    Uncover,
    /// Modern minimal theme.
    Bespoke,
}

impl Theme {
    /// Every built-in theme, in display order.
    pub const ALL: [Theme; 4] = [Self::Default, Self::Gaia, Self::Uncover, Self::Bespoke];

    /// Look up a theme by its exact identifier. Unknown identifiers map to
    /// `Default`.
    pub fn from_id(id: &str) -> Self {
        match id {
            "gaia" => Self::Gaia,
            "uncover" => Self::Uncover,
            "bespoke" => Self::Bespoke,
            "default" => Self::Default,
            other => {
                log::debug!("Unknown theme '{}', using default palette", other);
                Self::Default
            }
        }
    }

    /// Identifier as written in front matter.
    pub fn id(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Gaia => "gaia",
            Self::Uncover => "uncover",
            Self::Bespoke => "bespoke",
        }
    }

    /// Human readable name for theme pickers.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Gaia => "Gaia",
            Self::Uncover => "Uncover",
            Self::Bespoke => "Modern Minimal",
        }
    }

    /// The theme's color roles.
    pub fn palette(self) -> Palette {
        match self {
            Self::Default => Palette::new("FFFFFF", "333333", "666666", "4361EE"),
            Self::Gaia => Palette::new("101010", "FFFFFF", "CCCCCC", "3B82F6"),
            Self::Uncover => Palette::new("FFFFFF", "137CBD", "333333", "137CBD"),
            Self::Bespoke => Palette::new("FAFAFA", "2563EB", "333333", "3B82F6"),
        }
    }
}

/// Colors for each text role, as 6-digit RGB hex without `#`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: String,
    pub title: String,
    pub text: String,
    pub accent: String,
}

impl Palette {
    fn new(background: &str, title: &str, text: &str, accent: &str) -> Self {
        Self {
            background: background.to_string(),
            title: title.to_string(),
            text: text.to_string(),
            accent: accent.to_string(),
        }
    }
}

/// Resolve a theme identifier to its palette, falling back to the default.
pub fn resolve(theme_id: &str) -> Palette {
    Theme::from_id(theme_id).palette()
}

/// A short sample deck for previewing a theme.
///
/// Covers a title slide, a bullet list, a table and a closing slide.
pub fn sample_markdown(theme: Theme) -> String {
    format!(
        "---\n\
         marp: true\n\
         theme: {}\n\
         paginate: true\n\
         ---\n\
         \n\
         # Sample Presentation\n\
         \n\
         ---\n\
         \n\
         ## Key Points\n\
         \n\
         - First point\n\
         - Second point\n\
         - Third point\n\
         \n\
         ---\n\
         \n\
         ## Table Example\n\
         \n\
         | Item | Description |\n\
         |------|-------------|\n\
         | Item 1 | Description 1 |\n\
         | Item 2 | Description 2 |\n\
         \n\
         ---\n\
         \n\
         # Thank You!\n",
        theme.id()
    )
}
