//! Error types for stepflux
//!
//! Messages are Russian so they read naturally inside the report templates.

use thiserror::Error;

/// Errors raised while splitting and converting a raw log entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("ошибка, ожидалось полей: {expected}, получено: {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("ошибка при преобразовании поля {field} - {value:?} не является целым числом")]
    StepConversion { field: &'static str, value: String },

    #[error("ошибка при преобразовании поля {field} - {value:?}: {reason}")]
    DurationConversion {
        field: &'static str,
        value: String,
        reason: DurationError,
    },
}

/// Reasons a duration literal can be rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("пустая продолжительность")]
    Empty,

    #[error("отрицательная продолжительность недопустима")]
    Negative,

    #[error("ожидалось число")]
    MissingNumber,

    #[error("не указана единица измерения")]
    MissingUnit,

    #[error("неизвестная единица измерения {0:?}")]
    UnknownUnit(String),

    #[error("продолжительность вне допустимого диапазона")]
    Overflow,
}

/// Rejections of a step-only entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DailyError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("ошибка, количество шагов должно быть больше нуля: {0}")]
    NonPositiveSteps(i64),
}

/// Rejections of a training entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrainingError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("неизвестный тип тренировки: {0}")]
    UnknownActivity(String),
}

/// Errors raised while loading metrics configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("некорректный JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("некорректное значение {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },
}
