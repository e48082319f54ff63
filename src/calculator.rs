//! Metric formulas
//!
//! Closed-form conversions from step counts and durations to distance, mean
//! speed and calories:
//! - distance: `steps * step_length / 1000` (km)
//! - mean speed: `distance / hours` (km/h), zero for a zero duration
//! - running calories: `(18 * speed - 20) * weight`
//! - walking calories: `(0.035 * weight + speed² / height * 0.029) * hours * 60`

use std::time::Duration;

use crate::config::{MetricsConfig, METERS_PER_KM, MINUTES_PER_HOUR};
use crate::duration::hours;
use crate::types::{
    Activity, BiometricProfile, DailyEntry, DailyMetrics, TrainingEntry, TrainingMetrics,
};

/// Calculator bound to a set of coefficients
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsCalculator {
    config: MetricsConfig,
}

impl MetricsCalculator {
    pub fn new(config: MetricsConfig) -> Self {
        Self { config }
    }

    /// Distance covered, in kilometers
    pub fn distance_km(&self, steps: i64) -> f64 {
        steps as f64 * self.config.step_length_m / METERS_PER_KM
    }

    /// Mean speed in km/h; zero when `duration` is zero
    pub fn mean_speed_kmh(&self, steps: i64, duration: Duration) -> f64 {
        if duration.is_zero() {
            return 0.0;
        }
        self.distance_km(steps) / hours(duration)
    }

    /// Calories spent running
    pub fn running_calories(&self, steps: i64, weight_kg: f64, duration: Duration) -> f64 {
        let speed = self.mean_speed_kmh(steps, duration);
        (self.config.running_speed_multiplier * speed - self.config.running_speed_shift) * weight_kg
    }

    /// Calories spent walking
    pub fn walking_calories(
        &self,
        steps: i64,
        weight_kg: f64,
        height_cm: f64,
        duration: Duration,
    ) -> f64 {
        let speed = self.mean_speed_kmh(steps, duration);
        (self.config.walking_weight_multiplier * weight_kg
            + (speed * speed / height_cm) * self.config.walking_height_multiplier)
            * hours(duration)
            * MINUTES_PER_HOUR
    }

    /// Calories for a resolved activity. `None` for [`Activity::Unknown`].
    pub fn calories(
        &self,
        activity: Activity,
        steps: i64,
        profile: &BiometricProfile,
        duration: Duration,
    ) -> Option<f64> {
        match activity {
            Activity::Running => Some(self.running_calories(steps, profile.weight_kg, duration)),
            Activity::Walking => Some(self.walking_calories(
                steps,
                profile.weight_kg,
                profile.height_cm,
                duration,
            )),
            Activity::Unknown => None,
        }
    }

    /// Metrics for a step-only entry, using the walking formula
    pub fn daily_metrics(&self, entry: &DailyEntry, profile: &BiometricProfile) -> DailyMetrics {
        DailyMetrics {
            steps: entry.steps,
            distance_km: self.distance_km(entry.steps),
            calories: self.walking_calories(
                entry.steps,
                profile.weight_kg,
                profile.height_cm,
                entry.duration,
            ),
        }
    }

    /// Metrics for a training entry. `None` when the activity is unknown.
    pub fn training_metrics(
        &self,
        entry: &TrainingEntry,
        profile: &BiometricProfile,
    ) -> Option<TrainingMetrics> {
        let calories = self.calories(entry.activity, entry.steps, profile, entry.duration)?;
        Some(TrainingMetrics {
            activity: entry.activity,
            label: entry.label.clone(),
            steps: entry.steps,
            duration_hours: hours(entry.duration),
            distance_km: self.distance_km(entry.steps),
            mean_speed_kmh: self.mean_speed_kmh(entry.steps, entry.duration),
            calories,
        })
    }
}

/// [`MetricsCalculator::distance_km`] with default coefficients
pub fn distance_km(steps: i64) -> f64 {
    MetricsCalculator::default().distance_km(steps)
}

/// [`MetricsCalculator::mean_speed_kmh`] with default coefficients
pub fn mean_speed_kmh(steps: i64, duration: Duration) -> f64 {
    MetricsCalculator::default().mean_speed_kmh(steps, duration)
}

/// [`MetricsCalculator::running_calories`] with default coefficients
pub fn running_calories(steps: i64, weight_kg: f64, duration: Duration) -> f64 {
    MetricsCalculator::default().running_calories(steps, weight_kg, duration)
}

/// [`MetricsCalculator::walking_calories`] with default coefficients
pub fn walking_calories(steps: i64, weight_kg: f64, height_cm: f64, duration: Duration) -> f64 {
    MetricsCalculator::default().walking_calories(steps, weight_kg, height_cm, duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn half_hour() -> Duration {
        Duration::from_secs(1800)
    }

    #[test]
    fn test_distance() {
        assert!((distance_km(1000) - 0.65).abs() < EPS);
        assert!((distance_km(10_000) - 6.5).abs() < EPS);
        assert_eq!(distance_km(0), 0.0);
    }

    #[test]
    fn test_mean_speed() {
        // 0.65 km in half an hour
        assert!((mean_speed_kmh(1000, half_hour()) - 1.3).abs() < EPS);
    }

    #[test]
    fn test_mean_speed_zero_duration() {
        assert_eq!(mean_speed_kmh(1000, Duration::ZERO), 0.0);
    }

    #[test]
    fn test_running_calories() {
        let speed = distance_km(1000) / 0.5;
        let expected = (18.0 * speed - 20.0) * 70.0;
        assert!((running_calories(1000, 70.0, half_hour()) - expected).abs() < EPS);
    }

    #[test]
    fn test_running_calories_zero_duration() {
        // speed collapses to zero, leaving only the shift term
        assert!((running_calories(1000, 70.0, Duration::ZERO) + 1400.0).abs() < EPS);
    }

    #[test]
    fn test_walking_calories() {
        let speed = 1.3;
        let expected = (0.035 * 70.0 + (speed * speed / 175.0) * 0.029) * 0.5 * 60.0;
        assert!((walking_calories(1000, 70.0, 175.0, half_hour()) - expected).abs() < EPS);
    }

    #[test]
    fn test_custom_step_length() {
        let calc = MetricsCalculator::new(MetricsConfig::with_step_length(0.8));
        assert!((calc.distance_km(1000) - 0.8).abs() < EPS);
        assert!((calc.mean_speed_kmh(1000, half_hour()) - 1.6).abs() < EPS);
    }

    #[test]
    fn test_calories_dispatch() {
        let calc = MetricsCalculator::default();
        let profile = BiometricProfile::new(70.0, 175.0);

        let running = calc.calories(Activity::Running, 1000, &profile, half_hour());
        let walking = calc.calories(Activity::Walking, 1000, &profile, half_hour());

        assert_eq!(running, Some(running_calories(1000, 70.0, half_hour())));
        assert_eq!(
            walking,
            Some(walking_calories(1000, 70.0, 175.0, half_hour()))
        );
        assert_eq!(
            calc.calories(Activity::Unknown, 1000, &profile, half_hour()),
            None
        );
    }

    #[test]
    fn test_training_metrics() {
        let calc = MetricsCalculator::default();
        let profile = BiometricProfile::new(70.0, 175.0);
        let entry = TrainingEntry {
            steps: 1000,
            activity: Activity::Running,
            label: "Бег".to_string(),
            duration: half_hour(),
        };

        let metrics = calc.training_metrics(&entry, &profile).unwrap();
        assert_eq!(metrics.activity, Activity::Running);
        assert!((metrics.duration_hours - 0.5).abs() < EPS);
        assert!((metrics.distance_km - 0.65).abs() < EPS);
        assert!((metrics.mean_speed_kmh - 1.3).abs() < EPS);

        let unknown = TrainingEntry {
            activity: Activity::Unknown,
            label: "Плавание".to_string(),
            ..entry
        };
        assert!(calc.training_metrics(&unknown, &profile).is_none());
    }
}
