//! Summary entry points
//!
//! String API: [`daily_summary`] and [`training_summary`] never fail. Invalid
//! daily entries collapse to an empty string; training failures are rendered
//! as a descriptive line.
//!
//! Typed API: [`SummaryProcessor`] returns `Result<_, DailyError>` and
//! `Result<_, TrainingError>` so callers can tell a suppressed entry apart from
//! a real result.

use tracing::{debug, warn};

use crate::calculator::MetricsCalculator;
use crate::config::MetricsConfig;
use crate::error::{DailyError, TrainingError};
use crate::parser::{parse_daily_entry, parse_training_entry};
use crate::report::{render_daily, render_parse_error, render_training, UNKNOWN_TRAINING};
use crate::types::{BiometricProfile, DailyMetrics, TrainingMetrics};

/// Daily report for a `"<steps>,<duration>"` entry.
///
/// Returns an empty string when the entry does not parse or the step count is
/// not positive.
///
/// # Example
/// ```
/// let report = stepflux::daily_summary("6000,1h", 70.0, 175.0);
/// assert!(report.starts_with(" Количество шагов: 6000."));
/// assert_eq!(stepflux::daily_summary("0,10m", 70.0, 175.0), "");
/// ```
pub fn daily_summary(entry: &str, weight_kg: f64, height_cm: f64) -> String {
    SummaryProcessor::new().daily_report(entry, &BiometricProfile::new(weight_kg, height_cm))
}

/// Training report for a `"<steps>,<label>,<duration>"` entry.
///
/// # Example
/// ```
/// let report = stepflux::training_summary("1000,Плавание,30m", 70.0, 175.0);
/// assert_eq!(report, "Неизвестный тип тренировки\n");
/// ```
pub fn training_summary(entry: &str, weight_kg: f64, height_cm: f64) -> String {
    SummaryProcessor::new().training_report(entry, &BiometricProfile::new(weight_kg, height_cm))
}

/// Summary computation bound to a calculator configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryProcessor {
    calculator: MetricsCalculator,
}

impl SummaryProcessor {
    /// Processor with default coefficients
    pub fn new() -> Self {
        Self::default()
    }

    /// Processor with custom coefficients
    pub fn with_config(config: MetricsConfig) -> Self {
        Self {
            calculator: MetricsCalculator::new(config),
        }
    }

    /// Parse and compute a daily entry
    pub fn daily(
        &self,
        entry: &str,
        profile: &BiometricProfile,
    ) -> Result<DailyMetrics, DailyError> {
        let parsed = parse_daily_entry(entry)?;
        if parsed.steps <= 0 {
            return Err(DailyError::NonPositiveSteps(parsed.steps));
        }

        let metrics = self.calculator.daily_metrics(&parsed, profile);
        debug!(
            steps = metrics.steps,
            distance_km = metrics.distance_km,
            calories = metrics.calories,
            "computed daily metrics"
        );
        Ok(metrics)
    }

    /// Parse and compute a training entry. The step count is not sign-checked.
    pub fn training(
        &self,
        entry: &str,
        profile: &BiometricProfile,
    ) -> Result<TrainingMetrics, TrainingError> {
        let parsed = parse_training_entry(entry)?;
        let metrics = self
            .calculator
            .training_metrics(&parsed, profile)
            .ok_or_else(|| TrainingError::UnknownActivity(parsed.label.clone()))?;

        debug!(
            activity = metrics.activity.as_str(),
            steps = metrics.steps,
            mean_speed_kmh = metrics.mean_speed_kmh,
            calories = metrics.calories,
            "computed training metrics"
        );
        Ok(metrics)
    }

    /// Daily report, or an empty string when the entry is rejected
    pub fn daily_report(&self, entry: &str, profile: &BiometricProfile) -> String {
        match self.daily(entry, profile) {
            Ok(metrics) => render_daily(&metrics),
            Err(e) => {
                warn!(entry, error = %e, "daily entry rejected");
                String::new()
            }
        }
    }

    /// Training report, parse error line, or the unknown-training line
    pub fn training_report(&self, entry: &str, profile: &BiometricProfile) -> String {
        match self.training(entry, profile) {
            Ok(metrics) => render_training(&metrics),
            Err(TrainingError::Parse(e)) => {
                debug!(entry, error = %e, "training entry rejected");
                render_parse_error(&e)
            }
            Err(TrainingError::UnknownActivity(label)) => {
                debug!(label = %label, "unknown training type");
                UNKNOWN_TRAINING.to_string()
            }
        }
    }
}
