//! Race tuning
//!
//! Persisted separately from the discount in LocalStorage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{field} must be finite and greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("field {width}x{height} cannot hold the {player_width}x{player_height} player")]
    FieldTooSmall {
        width: f32,
        height: f32,
        player_width: f32,
        player_height: f32,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Race settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Session budget in simulated seconds
    pub total_time: f32,
    /// Distance needed to reach the store
    pub total_distance: f32,
    /// Constant progress accrual (units/s), independent of steering
    pub progress_rate: f32,
    /// Player locomotion speed (units/s per pressed axis)
    pub player_speed: f32,

    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    /// Upper bound on a single frame's delta (seconds)
    pub max_frame_delta: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            total_time: TOTAL_TIME,
            total_distance: TOTAL_DISTANCE,
            progress_rate: PROGRESS_RATE,
            player_speed: PLAYER_SPEED,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            max_frame_delta: MAX_FRAME_DELTA,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "diamond_street_settings";

    /// Check that every quantity is usable by the simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        let fields = [
            ("total_time", self.total_time),
            ("total_distance", self.total_distance),
            ("progress_rate", self.progress_rate),
            ("player_speed", self.player_speed),
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("max_frame_delta", self.max_frame_delta),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::NotPositive { field, value });
            }
        }

        if self.field_width < PLAYER_WIDTH || self.field_height < PLAYER_HEIGHT {
            return Err(SettingsError::FieldTooSmall {
                width: self.field_width,
                height: self.field_height,
                player_width: PLAYER_WIDTH,
                player_height: PLAYER_HEIGHT,
            });
        }

        Ok(())
    }

    /// Parse and validate settings from JSON (missing keys keep their defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Seconds a stationary race needs to reach the store
    pub fn arrival_time(&self) -> f32 {
        self.total_distance / self.progress_rate
    }

    /// Load settings from LocalStorage, falling back to defaults
    pub fn load() -> Self {
        match crate::persistence::load_json::<Settings>(Self::STORAGE_KEY) {
            Some(settings) => match settings.validate() {
                Ok(()) => {
                    log::info!("Loaded settings from LocalStorage");
                    settings
                }
                Err(e) => {
                    log::warn!("Stored settings rejected ({e}), using defaults");
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage
    pub fn save(&self) {
        if crate::persistence::save_json(Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.arrival_time(), 50.0);
    }

    #[test]
    fn rejects_non_positive_values() {
        let settings = Settings {
            progress_rate: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NotPositive {
                field: "progress_rate",
                value
            }) if value == 0.0
        ));

        let settings = Settings {
            total_time: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NotPositive { field: "total_time", .. })
        ));
    }

    #[test]
    fn rejects_field_smaller_than_player() {
        let settings = Settings {
            field_height: 50.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::FieldTooSmall { .. })
        ));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "total_time": 30.0 }"#).unwrap();
        assert_eq!(settings.total_time, 30.0);
        assert_eq!(settings.total_distance, TOTAL_DISTANCE);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        match Settings::from_json("{ nope") {
            Err(SettingsError::Parse(e)) => assert!(e.is_syntax()),
            other => panic!("expected a parse error, got {other:?}"),
        }
        let err = Settings::from_json(r#"{ "total_time": "soon" }"#).unwrap_err();
        assert!(std::error::Error::source(&err).is_some());
        assert!(matches!(
            Settings::from_json(r#"{ "player_speed": -5.0 }"#),
            Err(SettingsError::NotPositive { field: "player_speed", .. })
        ));
    }
}
