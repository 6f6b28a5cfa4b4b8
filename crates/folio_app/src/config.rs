//! Folio configuration file handling (`folio.toml`)

use crate::error::{ConfigError, Result};
use folio_animation::{RevealConfig, SpringConfig};
use folio_theme::ThemeConfig;
use folio_widgets::MagneticConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "folio.toml";

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

/// Motion tuning shared by affordances and reveals
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MotionConfig {
    /// Pointer-to-center scale for magnetic controls
    #[serde(default = "default_damping_factor")]
    pub damping_factor: f32,
    /// Degrees of tilt per pixel of displacement
    #[serde(default = "default_tilt_factor")]
    pub tilt_factor: f32,
    /// Displacement below which a release reads as rest
    #[serde(default = "default_rest_epsilon")]
    pub rest_epsilon: f32,
    /// Honor a reduced-motion preference
    #[serde(default)]
    pub reduced_motion: bool,
    /// Viewport inset for reveal triggers, in pixels
    #[serde(default = "default_reveal_margin")]
    pub reveal_margin: f32,
    /// Delay between staggered reveal items
    #[serde(default = "default_stagger_seconds")]
    pub stagger_seconds: f32,
}

fn default_damping_factor() -> f32 {
    0.25
}

fn default_tilt_factor() -> f32 {
    0.05
}

fn default_rest_epsilon() -> f32 {
    0.01
}

fn default_reveal_margin() -> f32 {
    100.0
}

fn default_stagger_seconds() -> f32 {
    0.08
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            damping_factor: default_damping_factor(),
            tilt_factor: default_tilt_factor(),
            rest_epsilon: default_rest_epsilon(),
            reduced_motion: false,
            reveal_margin: default_reveal_margin(),
            stagger_seconds: default_stagger_seconds(),
        }
    }
}

impl MotionConfig {
    /// Settings for a magnetic control
    pub fn magnetic(&self) -> MagneticConfig {
        MagneticConfig::default()
            .damping_factor(self.damping_factor)
            .tilt_factor(self.tilt_factor)
            .spring(SpringConfig::magnetic())
            .rest_epsilon(self.rest_epsilon)
            .reduced_motion(self.reduced_motion)
    }

    /// Settings for a reveal group
    pub fn reveal(&self) -> RevealConfig {
        RevealConfig {
            margin: self.reveal_margin,
            stagger_seconds: self.stagger_seconds,
            reduced_motion: self.reduced_motion,
            ..RevealConfig::default()
        }
    }
}

/// Content feed location
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ContentConfig {
    /// Path of the TOML content feed, relative to the working directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl FolioConfig {
    /// Load a config file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: FolioConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `folio.toml` from a directory, or the file itself
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        if path.is_dir() {
            Self::load(&path.join(CONFIG_FILE_NAME))
        } else {
            Self::load(path)
        }
    }

    /// Reject values the motion system cannot use
    pub fn validate(&self) -> Result<()> {
        let motion = &self.motion;
        let checks: [(&'static str, f32, bool); 5] = [
            ("motion.damping_factor", motion.damping_factor, motion.damping_factor >= 0.0),
            ("motion.tilt_factor", motion.tilt_factor, motion.tilt_factor.is_finite()),
            ("motion.rest_epsilon", motion.rest_epsilon, motion.rest_epsilon > 0.0),
            ("motion.reveal_margin", motion.reveal_margin, motion.reveal_margin.is_finite()),
            ("motion.stagger_seconds", motion.stagger_seconds, motion.stagger_seconds >= 0.0),
        ];
        for (field, value, ok) in checks {
            if !ok || !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is out of range"),
                });
            }
        }
        if self.theme.storage_key.is_empty() {
            return Err(ConfigError::Invalid {
                field: "theme.storage_key",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_theme::AccentId;

    #[test]
    fn test_empty_file_is_default() {
        let config: FolioConfig = toml::from_str("").unwrap();
        assert_eq!(config, FolioConfig::default());
        assert_eq!(config.motion.damping_factor, 0.25);
        assert_eq!(config.theme.storage_key, "accentKey");
    }

    #[test]
    fn test_partial_tables() {
        let config: FolioConfig = toml::from_str(
            r#"
            [theme]
            default_accent = "cyan"

            [motion]
            reduced_motion = true
            "#,
        )
        .unwrap();
        assert_eq!(config.theme.default_accent, AccentId::Cyan);
        assert!(config.motion.reduced_motion);
        assert_eq!(config.motion.stagger_seconds, 0.08);
        assert!(config.motion.magnetic().reduced_motion);
        assert!(config.motion.reveal().reduced_motion);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = FolioConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config, FolioConfig::default());
    }

    #[test]
    fn test_bad_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[motion]\ndamping_factor = \"high\"\n").unwrap();
        let err = FolioConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let mut config = FolioConfig::default();
        config.motion.rest_epsilon = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "motion.rest_epsilon", .. })
        ));

        let mut config = FolioConfig::default();
        config.theme.storage_key.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = FolioConfig::default();
        config.content.path = Some(PathBuf::from("demos/portfolio.toml"));
        let text = config.to_toml().unwrap();
        let parsed: FolioConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
