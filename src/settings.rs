//! Watch face settings
//!
//! Loaded from a JSON file on startup; every field falls back to its default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{START_TIME, TARGET_FPS};
use crate::error::SettingsError;

/// Runtime settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Presentation rate the scheduler paces to
    pub target_fps: u32,
    /// Surface size in device pixels
    pub screen_width: u32,
    pub screen_height: u32,
    /// Directory containing `res/` and `shaders/`
    pub asset_root: PathBuf,
    /// RNG seed for the resting heart-rate wander (derived from wall time when absent)
    pub seed: Option<u64>,
    /// Clock reading at power-on as [hours, minutes, seconds]
    pub start_time: [u8; 3],
    /// Battery fraction at power-on
    pub start_battery: f32,
    /// Stop the headless runner after this many seconds
    pub run_seconds: Option<f64>,
    /// Require asset files to exist on disk
    pub verify_assets: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS,
            screen_width: 800,
            screen_height: 800,
            asset_root: PathBuf::from("."),
            seed: None,
            start_time: START_TIME,
            start_battery: 1.0,
            run_seconds: None,
            verify_assets: false,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Reject values the models cannot start from
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.target_fps == 0 {
            return Err(SettingsError::Invalid("target_fps must be positive".into()));
        }
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(SettingsError::Invalid(format!(
                "screen size {}x{} is empty",
                self.screen_width, self.screen_height
            )));
        }
        let [h, m, s] = self.start_time;
        if h >= 24 || m >= 60 || s >= 60 {
            return Err(SettingsError::Invalid(format!(
                "start_time {h:02}:{m:02}:{s:02} out of range"
            )));
        }
        if !(0.0..=1.0).contains(&self.start_battery) {
            return Err(SettingsError::Invalid(format!(
                "start_battery {} outside [0, 1]",
                self.start_battery
            )));
        }
        if let Some(secs) = self.run_seconds {
            if !secs.is_finite() || secs < 0.0 {
                return Err(SettingsError::Invalid(format!("run_seconds {secs} invalid")));
            }
        }
        Ok(())
    }

    /// Target duration of one frame
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.target_fps, 75);
        assert_eq!(settings.start_time, [23, 59, 55]);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "target_fps": 60 }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.target_fps, 60);
        assert_eq!(settings.screen_width, 800);
        assert_eq!(settings.start_battery, 1.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{ "target_fps": 0 }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "start_time": [24, 0, 0] }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "start_battery": 1.5 }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_frame_duration() {
        let settings = Settings::default();
        let expected = 1.0 / 75.0;
        assert!((settings.frame_duration().as_secs_f64() - expected).abs() < 1e-9);
    }
}
