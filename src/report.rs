//! Report rendering
//!
//! Fixed text templates for daily and training summaries. Every numeric value
//! except the step count is printed with two decimals.

use crate::error::ParseError;
use crate::types::{DailyMetrics, TrainingMetrics};

/// Line returned for an unrecognized training label
pub const UNKNOWN_TRAINING: &str = "Неизвестный тип тренировки\n";

/// Three-line daily report
pub fn render_daily(metrics: &DailyMetrics) -> String {
    format!(
        " Количество шагов: {}.\n Дистанция составила {:.2} км.\n Вы сожгли {:.2} ккал.\n",
        metrics.steps, metrics.distance_km, metrics.calories
    )
}

/// Five-line training report
pub fn render_training(metrics: &TrainingMetrics) -> String {
    format!(
        " Тип тренировки: {}\n Длительность: {:.2}.\n Дистанция: {:.2}.\n Скорость: {:.2} км/ч\n Сожгли калорий: {:.2}\n",
        metrics.label,
        metrics.duration_hours,
        metrics.distance_km,
        metrics.mean_speed_kmh,
        metrics.calories
    )
}

/// Error line returned by the training summary when an entry fails to parse
pub fn render_parse_error(error: &ParseError) -> String {
    format!("Ошибка при получении данных: {}\n", error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Activity;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_daily() {
        let metrics = DailyMetrics {
            steps: 6000,
            distance_km: 3.9,
            calories: 171.23456,
        };
        assert_eq!(
            render_daily(&metrics),
            " Количество шагов: 6000.\n Дистанция составила 3.90 км.\n Вы сожгли 171.23 ккал.\n"
        );
    }

    #[test]
    fn test_render_training() {
        let metrics = TrainingMetrics {
            activity: Activity::Walking,
            label: "Ходьба".to_string(),
            steps: 3456,
            duration_hours: 3.0,
            distance_km: 2.2464,
            mean_speed_kmh: 0.7488,
            calories: 220.5,
        };
        assert_eq!(
            render_training(&metrics),
            " Тип тренировки: Ходьба\n Длительность: 3.00.\n Дистанция: 2.25.\n Скорость: 0.75 км/ч\n Сожгли калорий: 220.50\n"
        );
    }

    #[test]
    fn test_render_parse_error() {
        let error = ParseError::FieldCount {
            expected: 3,
            found: 2,
        };
        assert_eq!(
            render_parse_error(&error),
            "Ошибка при получении данных: ошибка, ожидалось полей: 3, получено: 2\n"
        );
    }
}
