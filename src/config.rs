//! Calculator configuration
//!
//! Formula coefficients live in [`MetricsConfig`] and are handed to the
//! calculator explicitly. Defaults reproduce the reference coefficients.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Average stride length in meters.
pub const STEP_LENGTH_M: f64 = 0.65;

/// Meters in a kilometer.
pub const METERS_PER_KM: f64 = 1000.0;

/// Minutes in an hour.
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Running: multiplier applied to mean speed.
pub const RUNNING_SPEED_MULTIPLIER: f64 = 18.0;

/// Running: shift subtracted from the scaled speed.
pub const RUNNING_SPEED_SHIFT: f64 = 20.0;

/// Walking: multiplier applied to body weight.
pub const WALKING_WEIGHT_MULTIPLIER: f64 = 0.035;

/// Walking: multiplier applied to the speed/height term.
pub const WALKING_HEIGHT_MULTIPLIER: f64 = 0.029;

/// Coefficients used by [`crate::calculator::MetricsCalculator`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Stride length (meters)
    pub step_length_m: f64,
    pub running_speed_multiplier: f64,
    pub running_speed_shift: f64,
    pub walking_weight_multiplier: f64,
    pub walking_height_multiplier: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            step_length_m: STEP_LENGTH_M,
            running_speed_multiplier: RUNNING_SPEED_MULTIPLIER,
            running_speed_shift: RUNNING_SPEED_SHIFT,
            walking_weight_multiplier: WALKING_WEIGHT_MULTIPLIER,
            walking_height_multiplier: WALKING_HEIGHT_MULTIPLIER,
        }
    }
}

impl MetricsConfig {
    /// Config with a custom stride length and default coefficients
    pub fn with_step_length(step_length_m: f64) -> Self {
        Self {
            step_length_m,
            ..Self::default()
        }
    }

    /// Load and validate a config from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every coefficient is finite and the stride is positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("step_length_m", self.step_length_m),
            ("running_speed_multiplier", self.running_speed_multiplier),
            ("running_speed_shift", self.running_speed_shift),
            ("walking_weight_multiplier", self.walking_weight_multiplier),
            ("walking_height_multiplier", self.walking_height_multiplier),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        if self.step_length_m <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "step_length_m",
                value: self.step_length_m,
            });
        }

        Ok(())
    }
}
