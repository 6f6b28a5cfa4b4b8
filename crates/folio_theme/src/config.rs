//! Theme configuration (`[theme]` table of `folio.toml`)

use crate::accent::AccentId;
use serde::{Deserialize, Serialize};

/// Default storage key
pub const DEFAULT_STORAGE_KEY: &str = "accentKey";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeConfig {
    /// Key the selected accent is persisted under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Accent used when nothing valid is persisted
    #[serde(default)]
    pub default_accent: AccentId,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            default_accent: AccentId::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: ThemeConfig = toml::from_str("").unwrap();
        assert_eq!(config, ThemeConfig::default());
        assert_eq!(config.storage_key, "accentKey");
        assert_eq!(config.default_accent, AccentId::Orange);
    }

    #[test]
    fn test_parse_overrides() {
        let config: ThemeConfig =
            toml::from_str("storage_key = \"theme\"\ndefault_accent = \"violet\"\n").unwrap();
        assert_eq!(config.storage_key, "theme");
        assert_eq!(config.default_accent, AccentId::Violet);
    }

    #[test]
    fn test_unknown_default_accent_is_rejected() {
        assert!(toml::from_str::<ThemeConfig>("default_accent = \"lime\"").is_err());
    }
}
