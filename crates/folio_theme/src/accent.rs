//! Accent palette
//!
//! The set of accents is closed: [`AccentId`] enumerates every accent the
//! page can show, and each id maps to exactly one [`AccentToken`]. Tokens are
//! built on first access and live for the rest of the process.

use folio_core::{Color, GradientStop, LinearGradient};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Raw palette colors
pub mod palette {
    use folio_core::Color;

    pub const ORANGE: Color = Color::from_hex(0xF24D1B);
    pub const ORANGE_LIGHT: Color = Color::from_hex(0xF35933);
    pub const ORANGE_DARK: Color = Color::from_hex(0xE64A19);

    pub const CYAN: Color = Color::from_hex(0x06B6D4);
    pub const CYAN_LIGHT: Color = Color::from_hex(0x0ABFDB);
    pub const CYAN_DARK: Color = Color::from_hex(0x06ACC1);

    pub const RED: Color = Color::from_hex(0xF03746);
    pub const RED_LIGHT: Color = Color::from_hex(0xF14B58);
    pub const RED_DARK: Color = Color::from_hex(0xE33341);

    pub const VIOLET: Color = Color::from_hex(0x8531DE);
    pub const VIOLET_LIGHT: Color = Color::from_hex(0x9146E1);
    pub const VIOLET_DARK: Color = Color::from_hex(0x7A2DD2);
}

/// Angle shared by every accent gradient
pub const GRADIENT_ANGLE: f32 = 135.0;

/// Identifier of a selectable accent
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentId {
    #[default]
    Orange,
    Cyan,
    Red,
    Violet,
}

impl AccentId {
    /// Stable id used for persistence and config
    pub fn id(self) -> &'static str {
        match self {
            Self::Orange => "orange",
            Self::Cyan => "cyan",
            Self::Red => "red",
            Self::Violet => "violet",
        }
    }

    /// User-facing display name
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Orange => "Orange",
            Self::Cyan => "Cyan",
            Self::Red => "Red",
            Self::Violet => "Violet",
        }
    }

    /// Every accent, in picker order
    pub fn all() -> &'static [AccentId] {
        const ACCENTS: [AccentId; 4] = [
            AccentId::Orange,
            AccentId::Cyan,
            AccentId::Red,
            AccentId::Violet,
        ];
        &ACCENTS
    }

    /// Look up an id; exact, case-sensitive match
    pub fn parse(id: &str) -> Option<AccentId> {
        Self::all().iter().copied().find(|a| a.id() == id)
    }

    /// The token for this accent
    pub fn token(self) -> &'static AccentToken {
        // tokens() is built from all() in order
        &tokens()[self as usize]
    }
}

impl Display for AccentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when a string names no accent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown accent {0:?}")]
pub struct UnknownAccent(pub String);

impl FromStr for AccentId {
    type Err = UnknownAccent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownAccent(s.to_string()))
    }
}

/// Visual values for one accent
#[derive(Clone, Debug, PartialEq)]
pub struct AccentToken {
    pub id: AccentId,
    pub primary: Color,
    pub gradient: LinearGradient,
}

impl AccentToken {
    fn new(id: AccentId, light: Color, primary: Color, dark: Color) -> Self {
        Self {
            id,
            primary,
            gradient: LinearGradient::new(
                GRADIENT_ANGLE,
                [
                    GradientStop::new(0.0, light),
                    GradientStop::new(0.5, primary),
                    GradientStop::new(1.0, dark),
                ],
            ),
        }
    }

    pub fn name(&self) -> &'static str {
        self.id.display_name()
    }
}

fn tokens() -> &'static [AccentToken] {
    static TOKENS: OnceLock<Vec<AccentToken>> = OnceLock::new();
    TOKENS.get_or_init(|| {
        AccentId::all()
            .iter()
            .map(|&id| match id {
                AccentId::Orange => AccentToken::new(
                    id,
                    palette::ORANGE_LIGHT,
                    palette::ORANGE,
                    palette::ORANGE_DARK,
                ),
                AccentId::Cyan => {
                    AccentToken::new(id, palette::CYAN_LIGHT, palette::CYAN, palette::CYAN_DARK)
                }
                AccentId::Red => {
                    AccentToken::new(id, palette::RED_LIGHT, palette::RED, palette::RED_DARK)
                }
                AccentId::Violet => AccentToken::new(
                    id,
                    palette::VIOLET_LIGHT,
                    palette::VIOLET,
                    palette::VIOLET_DARK,
                ),
            })
            .collect()
    })
}

/// Every accent token, in picker order
pub fn accent_tokens() -> &'static [AccentToken] {
    tokens()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_id_maps_to_its_own_token() {
        for &id in AccentId::all() {
            assert_eq!(id.token().id, id);
        }
        assert_eq!(accent_tokens().len(), AccentId::all().len());
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(AccentId::parse("violet"), Some(AccentId::Violet));
        assert_eq!(AccentId::parse("Violet"), None);
        assert_eq!(AccentId::parse(" violet"), None);
        assert_eq!(AccentId::parse("lime"), None);
        assert_eq!("cyan".parse::<AccentId>(), Ok(AccentId::Cyan));
        assert_eq!(
            "lime".parse::<AccentId>(),
            Err(UnknownAccent("lime".to_string()))
        );
    }

    #[test]
    fn test_default_is_orange() {
        assert_eq!(AccentId::default(), AccentId::Orange);
    }

    #[test]
    fn test_token_is_stable_across_calls() {
        assert!(std::ptr::eq(AccentId::Red.token(), AccentId::Red.token()));
    }

    #[test]
    fn test_orange_values() {
        let token = AccentId::Orange.token();
        assert_eq!(token.primary.to_css(), "#f24d1b");
        assert_eq!(
            token.gradient.to_css(),
            "linear-gradient(135deg, #f35933 0%, #f24d1b 50%, #e64a19 100%)"
        );
    }

    #[test]
    fn test_serde_uses_lowercase_ids() {
        let json = serde_json::to_string(&AccentId::Violet).unwrap();
        assert_eq!(json, "\"violet\"");
        let parsed: AccentId = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(parsed, AccentId::Red);
    }
}
