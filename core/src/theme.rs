// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Colors offered in the day editor.
pub const COLORS: [&str; 8] = [
    "#FFB7C5", // pink
    "#98E4C9", // mint
    "#C9B1FF", // lavender
    "#FFCCB3", // peach
    "#FFD6E8", // light pink
    "#C5E8F7", // sky
    "#FFF2C9", // yellow
    "#E8D5E7", // pale purple
];

/// Emojis offered when the user has not configured their own list.
pub const DEFAULT_EMOJIS: &str = "❤️ 😊 ⭐ 🎉 😢 🌟 💪 🌸 ☀️ 🌙 ✨ 🎂 🏖️ ❄️ 🍂";

/// Color theme of the whole application.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Sakura,
    Mint,
    #[default]
    Lavender,
    Honey,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Sakura, Theme::Mint, Theme::Lavender, Theme::Honey];

    /// Stable identifier used in saved data.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Theme::Sakura => "sakura",
            Theme::Mint => "mint",
            Theme::Lavender => "lavender",
            Theme::Honey => "honey",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Theme::Sakura => "Sakura",
            Theme::Mint => "Mint Dream",
            Theme::Lavender => "Lavender Haze",
            Theme::Honey => "Honey Morning",
        }
    }

    /// Three swatches that characterize the theme.
    pub const fn preview(&self) -> [&'static str; 3] {
        match self {
            Theme::Sakura => ["#FFB7C5", "#E8D5E7", "#FFCCB3"],
            Theme::Mint => ["#98E4C9", "#C5E8F7", "#A8E6CF"],
            Theme::Lavender => ["#C9B1FF", "#FFD6E8", "#D4B5FF"],
            Theme::Honey => ["#FFCCB3", "#FFF2C9", "#FFD9A0"],
        }
    }

    pub const fn background(&self) -> &'static str {
        match self {
            Theme::Sakura => "#FFF8F0",
            Theme::Mint => "#F0FFF4",
            Theme::Lavender => "#F8F4FF",
            Theme::Honey => "#FFFBF0",
        }
    }

    /// The main accent color, the first preview swatch.
    pub const fn accent(&self) -> &'static str {
        self.preview()[0]
    }

    /// Parse a stored theme, falling back to the default for unknown values.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            tracing::warn!(theme = s, "unrecognized theme, using default");
            Theme::default()
        })
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown theme: {s}"))
    }
}

impl Serialize for Theme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.map(|s| Theme::parse_lenient(&s)).unwrap_or_default())
    }
}

/// The emojis to offer, from the user's custom list when it is not blank.
pub fn emoji_palette(custom: &str) -> Vec<String> {
    let source = if custom.trim().is_empty() {
        DEFAULT_EMOJIS
    } else {
        custom
    };
    source.split_whitespace().map(str::to_owned).collect()
}

/// Deduplicate a whitespace separated emoji list, keeping the first
/// occurrence of each, joined by single spaces.
pub fn normalize_emojis(custom: &str) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for emoji in custom.split_whitespace() {
        if !seen.contains(&emoji) {
            seen.push(emoji);
        }
    }
    seen.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_themes() {
        for theme in Theme::ALL {
            assert_eq!(theme.as_str().parse::<Theme>().unwrap(), theme);
        }
        assert!("midnight".parse::<Theme>().is_err());
    }

    #[test]
    fn falls_back_to_lavender() {
        assert_eq!(Theme::default(), Theme::Lavender);
        assert_eq!(Theme::parse_lenient("neon"), Theme::Lavender);
        assert_eq!(Theme::parse_lenient("mint"), Theme::Mint);
    }

    #[test]
    fn deserializes_unknown_theme_as_default() {
        let theme: Theme = serde_json::from_str(r#""honey""#).unwrap();
        assert_eq!(theme, Theme::Honey);

        let theme: Theme = serde_json::from_str(r#""solarized""#).unwrap();
        assert_eq!(theme, Theme::Lavender);

        let theme: Theme = serde_json::from_str("null").unwrap();
        assert_eq!(theme, Theme::Lavender);
    }

    #[test]
    fn serializes_as_identifier() {
        assert_eq!(serde_json::to_string(&Theme::Sakura).unwrap(), r#""sakura""#);
    }

    #[test]
    fn uses_default_emojis_for_blank_custom_list() {
        let palette = emoji_palette("   ");
        assert_eq!(palette.len(), 15);
        assert_eq!(palette[0], "❤️");
        assert_eq!(palette[14], "🍂");
    }

    #[test]
    fn uses_custom_emojis_when_present() {
        let palette = emoji_palette(" 🐱\t🐶\n🐭 ");
        assert_eq!(palette, vec!["🐱", "🐶", "🐭"]);
    }

    #[test]
    fn normalizes_custom_emojis() {
        assert_eq!(normalize_emojis("🐱  🐶 🐱\n🐭 🐶"), "🐱 🐶 🐭");
        assert_eq!(normalize_emojis("   "), "");
    }
}
