// src/config.rs
//
// Immutable configuration snapshot. Loaded once, validated, then shared
// read-only (Arc<Config>) by every component.

use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Detections farther than this are not tracked (meters)
    pub detection_range: f64,
    /// Vehicles ahead closer than this force low beam (meters)
    pub safe_distance: f64,
    /// Maximum beam transition time accepted by the hardware (seconds)
    pub transition_time_limit: f64,
    /// Nominal tick rate of the caller (Hz)
    pub update_frequency: f64,
    /// Overtaking high-beam blink rate (Hz)
    pub blinking_frequency: f64,
    /// Shortest horn pulse (seconds)
    pub horn_pulse_duration_min: f64,
    /// Longest horn pulse (seconds)
    pub horn_pulse_duration_max: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detection_range: 200.0,
            safe_distance: 50.0,
            transition_time_limit: 0.2,
            update_frequency: 10.0,
            blinking_frequency: 2.0,
            horn_pulse_duration_min: 0.2,
            horn_pulse_duration_max: 0.3,
        }
    }
}

impl Config {
    /// Load from YAML, or JSON when the file has a `.json` extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = if is_json(path) {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        };
        config.with_context(|| format!("parsing config {}", path.display()))
    }

    /// Write with the same extension rule as [`Config::load`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        fs::write(path, contents).with_context(|| format!("writing config {}", path.display()))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("detection_range", self.detection_range),
            ("safe_distance", self.safe_distance),
            ("transition_time_limit", self.transition_time_limit),
            ("update_frequency", self.update_frequency),
            ("blinking_frequency", self.blinking_frequency),
            ("horn_pulse_duration_min", self.horn_pulse_duration_min),
            ("horn_pulse_duration_max", self.horn_pulse_duration_max),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be finite and > 0, got {}", value),
                });
            }
        }
        if self.horn_pulse_duration_min > self.horn_pulse_duration_max {
            return Err(ConfigError::Invalid {
                field: "horn_pulse_duration_min",
                reason: format!(
                    "{} exceeds horn_pulse_duration_max {}",
                    self.horn_pulse_duration_min, self.horn_pulse_duration_max
                ),
            });
        }
        Ok(())
    }

    /// Length of one blink cycle (seconds)
    pub fn blink_period(&self) -> f64 {
        1.0 / self.blinking_frequency
    }

    /// Horn pulse fired once per blink cycle while overtaking
    pub fn horn_sync_pulse(&self) -> f64 {
        (self.horn_pulse_duration_min + self.horn_pulse_duration_max) / 2.0
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
