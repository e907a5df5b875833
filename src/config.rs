//! Tunable gesture constants and theme
//!
//! Every threshold the controllers use lives here so a host can override it
//! from `~/.config/flick-sheet/config.toml`. Missing keys fall back to the
//! defaults below.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::ui::primitives::Easing;
use crate::ui::theme::Theme;

/// Drag-to-dismiss panel tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Downward drag distance past which release dismisses the panel
    pub dismiss_threshold: f64,
    /// Multiplier applied to upward (overscroll) drag deltas
    pub overscroll_damping: f64,
    /// Settle duration in seconds for snap-back, reload and full dismiss
    pub base_duration: f64,
    /// Content height used when no provider is attached
    pub fallback_height: f64,
    pub easing: Easing,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            dismiss_threshold: 150.0,
            overscroll_damping: 0.5,
            base_duration: 0.5,
            fallback_height: 300.0,
            easing: Easing::EaseInOut,
        }
    }
}

/// Swipe-to-reveal row tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Offset past which a released row stays open
    pub lock_distance: f64,
    /// Settle duration in seconds for lock and return-to-center
    pub settle_duration: f64,
    /// Resting displacement of the background reveal layer
    pub background_rest: f64,
    /// Movement a touch may make before it stops being a tap
    pub claim_distance: f64,
    pub easing: Easing,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            lock_distance: 50.0,
            settle_duration: 0.2,
            background_rest: 0.0,
            claim_distance: 10.0,
            easing: Easing::EaseOut,
        }
    }
}

/// Press feedback tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TapConfig {
    /// Scale the row shrinks to while pressed
    pub pressed_scale: f64,
    pub press_duration: f64,
    pub release_duration: f64,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            pressed_scale: 0.96,
            press_duration: 0.25,
            release_duration: 0.15,
        }
    }
}

/// Whole configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub panel: PanelConfig,
    pub swipe: SwipeConfig,
    pub tap: TapConfig,
    pub theme: Theme,
}

impl SheetConfig {
    /// Default config file location
    pub fn config_path() -> Option<PathBuf> {
        std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| std::env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
            .ok()
            .map(|dir| dir.join("flick-sheet").join("config.toml"))
    }

    /// Load config from the default location, or return defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => match Self::load_from(&path) {
                Ok(config) => {
                    info!("Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Ignoring config at {:?}: {}", path, e);
                    Self::default()
                }
            },
            _ => {
                info!("No config found, using defaults");
                Self::default()
            }
        }
    }

    /// Load and validate a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, self.to_toml_string()?).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject values the controllers cannot work with
    pub fn validate(&self) -> Result<()> {
        positive("panel.dismiss_threshold", self.panel.dismiss_threshold)?;
        positive("panel.fallback_height", self.panel.fallback_height)?;
        non_negative("panel.base_duration", self.panel.base_duration)?;
        if !(0.0..=1.0).contains(&self.panel.overscroll_damping) {
            return Err(invalid("panel.overscroll_damping", "must be within 0.0 - 1.0"));
        }

        positive("swipe.lock_distance", self.swipe.lock_distance)?;
        non_negative("swipe.settle_duration", self.swipe.settle_duration)?;
        non_negative("swipe.claim_distance", self.swipe.claim_distance)?;
        if !self.swipe.background_rest.is_finite() {
            return Err(invalid("swipe.background_rest", "must be finite"));
        }

        if !(self.tap.pressed_scale > 0.0 && self.tap.pressed_scale <= 1.0) {
            return Err(invalid("tap.pressed_scale", "must be within (0.0, 1.0]"));
        }
        non_negative("tap.press_duration", self.tap.press_duration)?;
        non_negative("tap.release_duration", self.tap.release_duration)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> Error {
    Error::InvalidConfig {
        field,
        reason: reason.to_string(),
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a positive number"))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be zero or positive"))
    }
}
