//! Core types for stepflux
//!
//! Parsed log entries, caller-supplied biometrics and the computed metrics that
//! the report renderer consumes.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Training kind resolved from the activity label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Running,
    Walking,
    Unknown,
}

impl Activity {
    /// Resolve a label. Matching is exact: no trimming, no case folding.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Бег" | "Running" => Activity::Running,
            "Ходьба" | "Walking" => Activity::Walking,
            _ => Activity::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Running => "running",
            Activity::Walking => "walking",
            Activity::Unknown => "unknown",
        }
    }
}

/// Caller biometrics, supplied per invocation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiometricProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
}

impl BiometricProfile {
    pub fn new(weight_kg: f64, height_cm: f64) -> Self {
        Self {
            weight_kg,
            height_cm,
        }
    }
}

/// Step-only entry: `"<steps>,<duration>"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyEntry {
    pub steps: i64,
    pub duration: Duration,
}

/// Training entry: `"<steps>,<label>,<duration>"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingEntry {
    pub steps: i64,
    pub activity: Activity,
    /// Label exactly as it appeared in the entry
    pub label: String,
    pub duration: Duration,
}

/// Metrics for a step-only entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMetrics {
    pub steps: i64,
    pub distance_km: f64,
    pub calories: f64,
}

/// Metrics for a recognized training entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingMetrics {
    pub activity: Activity,
    pub label: String,
    pub steps: i64,
    pub duration_hours: f64,
    pub distance_km: f64,
    pub mean_speed_kmh: f64,
    pub calories: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_from_label() {
        assert_eq!(Activity::from_label("Бег"), Activity::Running);
        assert_eq!(Activity::from_label("Running"), Activity::Running);
        assert_eq!(Activity::from_label("Ходьба"), Activity::Walking);
        assert_eq!(Activity::from_label("Walking"), Activity::Walking);
        assert_eq!(Activity::from_label("Плавание"), Activity::Unknown);
        assert_eq!(Activity::from_label(" Бег"), Activity::Unknown);
        assert_eq!(Activity::from_label("running"), Activity::Unknown);
    }

    #[test]
    fn test_metrics_serialize_in_field_order() {
        let daily = DailyMetrics {
            steps: 6000,
            distance_km: 3.9,
            calories: 150.5,
        };
        assert_eq!(
            serde_json::to_string(&daily).unwrap(),
            r#"{"steps":6000,"distance_km":3.9,"calories":150.5}"#
        );

        let training = TrainingMetrics {
            activity: Activity::Running,
            label: "Бег".to_string(),
            steps: 1000,
            duration_hours: 0.5,
            distance_km: 0.65,
            mean_speed_kmh: 1.3,
            calories: 238.0,
        };
        assert_eq!(
            serde_json::to_string(&training).unwrap(),
            r#"{"activity":"running","label":"Бег","steps":1000,"duration_hours":0.5,"distance_km":0.65,"mean_speed_kmh":1.3,"calories":238.0}"#
        );
    }

    #[test]
    fn test_activity_serializes_snake_case() {
        let json = serde_json::to_string(&Activity::Walking).unwrap();
        assert_eq!(json, "\"walking\"");
    }
}
