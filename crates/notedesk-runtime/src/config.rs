#![forbid(unsafe_code)]

//! Desk configuration as data.
//!
//! Groups every tunable constant of the desk into one [`DeskConfig`] that can
//! be loaded from TOML or JSON (feature `config`). Defaults reproduce the
//! reference desk exactly, so `DeskConfig::default()` needs no file at all.
//!
//! ```toml
//! [layout]
//! gap = 24.0
//!
//! [drag]
//! grid_size = 20.0
//!
//! [scroll]
//! settle_max_frames = 120
//! ```

#[cfg(feature = "config")]
use std::path::Path;

use core::time::Duration;

use notedesk_layout::LayoutConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::drag::{DEFAULT_GRID_SIZE, DEFAULT_LIFT_ROTATION};
use crate::height::DEFAULT_HEIGHT_CUSHION;
use crate::menu::DEFAULT_EXIT_DELAY;
use crate::scroll::ScrollConfig;

/// Top-level desk configuration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeskConfig {
    pub layout: LayoutConfig,
    pub drag: DragConfig,
    pub scroll: ScrollConfig,
    pub height: HeightConfig,
    pub menu: MenuConfig,
}

/// Drag and snap parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragConfig {
    /// Snap grid in pixels.
    pub grid_size: f64,
    /// Maximum picked-up tilt magnitude in degrees.
    pub lift_rotation: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            lift_rotation: DEFAULT_LIFT_ROTATION,
        }
    }
}

/// Container height parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeightConfig {
    /// Space below the lowest card.
    pub cushion: f64,
}

impl Default for HeightConfig {
    fn default() -> Self {
        Self {
            cushion: DEFAULT_HEIGHT_CUSHION,
        }
    }
}

/// Menu transition parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MenuConfig {
    /// Time the menu stays mounted after it starts closing.
    pub exit_delay_ms: u64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            exit_delay_ms: DEFAULT_EXIT_DELAY.as_millis() as u64,
        }
    }
}

impl MenuConfig {
    #[must_use]
    pub const fn exit_delay(&self) -> Duration {
        Duration::from_millis(self.exit_delay_ms)
    }
}

impl DeskConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of violations; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.layout.validate();
        if !self.drag.grid_size.is_finite() || self.drag.grid_size <= 0.0 {
            errors.push(format!(
                "drag.grid_size must be > 0, got {}",
                self.drag.grid_size
            ));
        }
        if !self.drag.lift_rotation.is_finite() || self.drag.lift_rotation < 0.0 {
            errors.push(format!(
                "drag.lift_rotation must be >= 0, got {}",
                self.drag.lift_rotation
            ));
        }
        errors.extend(self.scroll.validate());
        if !self.height.cushion.is_finite() || self.height.cushion < 0.0 {
            errors.push(format!(
                "height.cushion must be >= 0, got {}",
                self.height.cushion
            ));
        }
        errors
    }

    /// `self` if valid, the violations otherwise.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}

/// Errors that can occur when loading a desk configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Range violations.
    Invalid(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Invalid(errors) => write!(f, "invalid config: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_component_constants() {
        let cfg = DeskConfig::default();
        assert_eq!(cfg.drag.grid_size, 26.0);
        assert_eq!(cfg.drag.lift_rotation, 2.0);
        assert_eq!(cfg.height.cushion, 24.0);
        assert_eq!(cfg.menu.exit_delay(), Duration::from_millis(300));
        assert_eq!(cfg.scroll.positioned_offset, 80.0);
        assert_eq!(cfg.scroll.nav_extra, 16.0);
        assert_eq!(cfg.layout.gap, 28.0);
    }

    #[test]
    fn default_validates_clean() {
        let errors = DeskConfig::default().validate();
        assert!(errors.is_empty(), "default should validate: {errors:?}");
    }

    #[test]
    fn validate_catches_zero_grid() {
        let mut cfg = DeskConfig::default();
        cfg.drag.grid_size = 0.0;
        let errors = cfg.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("grid_size"));
    }

    #[test]
    fn validate_collects_across_sections() {
        let mut cfg = DeskConfig::default();
        cfg.layout.wide_min_width = 800.0;
        cfg.scroll.settle_max_elapsed_ms = 0;
        cfg.height.cushion = f64::NAN;
        assert_eq!(cfg.validate().len(), 3);
        match cfg.validated() {
            Err(ConfigError::Invalid(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn error_display_joins_violations() {
        let err = ConfigError::Invalid(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "invalid config: a; b");
    }

    #[cfg(feature = "config")]
    mod loading {
        use super::*;
        use std::io::Write;

        #[test]
        fn toml_overrides_only_named_fields() {
            let cfg = DeskConfig::from_toml_str(
                r#"
                [drag]
                grid_size = 20.0

                [scroll]
                settle_max_frames = 120
                "#,
            )
            .expect("valid toml");
            assert_eq!(cfg.drag.grid_size, 20.0);
            assert_eq!(cfg.drag.lift_rotation, 2.0);
            assert_eq!(cfg.scroll.settle_max_frames, 120);
            assert_eq!(cfg.layout, LayoutConfig::default());
        }

        #[test]
        fn json_round_trip() {
            let mut cfg = DeskConfig::default();
            cfg.menu.exit_delay_ms = 150;
            let json = serde_json::to_string(&cfg).expect("serialize");
            assert_eq!(DeskConfig::from_json_str(&json).expect("parse"), cfg);
        }

        #[test]
        fn toml_file_loads() {
            let mut file = tempfile::NamedTempFile::new().expect("tempfile");
            writeln!(file, "[height]\ncushion = 40.0").expect("write");
            let cfg = DeskConfig::from_toml_file(file.path()).expect("load");
            assert_eq!(cfg.height.cushion, 40.0);
        }

        #[test]
        fn missing_file_is_io_error() {
            let dir = tempfile::tempdir().expect("tempdir");
            let err = DeskConfig::from_toml_file(dir.path().join("absent.toml"))
                .expect_err("file is absent");
            assert!(matches!(err, ConfigError::Io(_)));
        }

        #[test]
        fn malformed_json_is_json_error() {
            let err = DeskConfig::from_json_str("{ not json").expect_err("malformed");
            assert!(matches!(err, ConfigError::Json(_)));
            assert!(err.to_string().starts_with("JSON parse error"));
        }
    }
}
