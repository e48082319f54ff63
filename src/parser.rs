//! Record parsing
//!
//! Splits raw comma-delimited log entries and converts each field. Parsing is
//! all-or-nothing: any bad field fails the whole entry.

use crate::duration::parse_duration;
use crate::error::ParseError;
use crate::types::{Activity, DailyEntry, TrainingEntry};

/// Field delimiter
pub const DELIMITER: char = ',';

/// Field count of a step-only entry
pub const DAILY_FIELDS: usize = 2;

/// Field count of a training entry
pub const TRAINING_FIELDS: usize = 3;

/// Split `raw` on [`DELIMITER`], requiring exactly `expected` fields.
pub fn split_fields(raw: &str, expected: usize) -> Result<Vec<&str>, ParseError> {
    let fields: Vec<&str> = raw.split(DELIMITER).collect();
    if fields.len() != expected {
        return Err(ParseError::FieldCount {
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

/// Parse `"<steps>,<duration>"`
pub fn parse_daily_entry(raw: &str) -> Result<DailyEntry, ParseError> {
    let fields = split_fields(raw, DAILY_FIELDS)?;
    let steps = parse_steps(fields[0])?;
    let duration = parse_duration_field(fields[1])?;
    Ok(DailyEntry { steps, duration })
}

/// Parse `"<steps>,<label>,<duration>"`
///
/// The label is resolved to an [`Activity`] here; an unrecognized label is not
/// a parse error and yields [`Activity::Unknown`].
pub fn parse_training_entry(raw: &str) -> Result<TrainingEntry, ParseError> {
    let fields = split_fields(raw, TRAINING_FIELDS)?;
    let steps = parse_steps(fields[0])?;
    let label = fields[1];
    let duration = parse_duration_field(fields[2])?;
    Ok(TrainingEntry {
        steps,
        activity: Activity::from_label(label),
        label: label.to_string(),
        duration,
    })
}

fn parse_steps(value: &str) -> Result<i64, ParseError> {
    value.parse::<i64>().map_err(|_| ParseError::StepConversion {
        field: "steps",
        value: value.to_string(),
    })
}

fn parse_duration_field(value: &str) -> Result<std::time::Duration, ParseError> {
    parse_duration(value).map_err(|reason| ParseError::DurationConversion {
        field: "duration",
        value: value.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DurationError;
    use std::time::Duration;

    #[test]
    fn test_parse_daily_entry() {
        let entry = parse_daily_entry("6000,1h30m").unwrap();
        assert_eq!(entry.steps, 6000);
        assert_eq!(entry.duration, Duration::from_secs(5400));
    }

    #[test]
    fn test_daily_field_count() {
        assert_eq!(
            parse_daily_entry("6000"),
            Err(ParseError::FieldCount {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            parse_daily_entry("6000,Бег,1h"),
            Err(ParseError::FieldCount {
                expected: 2,
                found: 3
            })
        );
        assert!(matches!(
            parse_daily_entry(""),
            Err(ParseError::FieldCount { found: 1, .. })
        ));
    }

    #[test]
    fn test_negative_steps_still_parse() {
        let entry = parse_daily_entry("-5,10m").unwrap();
        assert_eq!(entry.steps, -5);
    }

    #[test]
    fn test_step_conversion_error() {
        assert_eq!(
            parse_daily_entry("not-a-number,10m"),
            Err(ParseError::StepConversion {
                field: "steps",
                value: "not-a-number".to_string()
            })
        );
        assert!(matches!(
            parse_daily_entry(" 100,10m"),
            Err(ParseError::StepConversion { .. })
        ));
        assert!(matches!(
            parse_daily_entry("1.5,10m"),
            Err(ParseError::StepConversion { .. })
        ));
    }

    #[test]
    fn test_duration_conversion_error() {
        assert_eq!(
            parse_daily_entry("100,ten minutes"),
            Err(ParseError::DurationConversion {
                field: "duration",
                value: "ten minutes".to_string(),
                reason: DurationError::MissingNumber,
            })
        );
    }

    #[test]
    fn test_parse_training_entry() {
        let entry = parse_training_entry("3456,Ходьба,3h00m").unwrap();
        assert_eq!(entry.steps, 3456);
        assert_eq!(entry.activity, Activity::Walking);
        assert_eq!(entry.label, "Ходьба");
        assert_eq!(entry.duration, Duration::from_secs(3 * 3600));
    }

    #[test]
    fn test_training_unknown_label_is_not_an_error() {
        let entry = parse_training_entry("1000,Плавание,30m").unwrap();
        assert_eq!(entry.activity, Activity::Unknown);
        assert_eq!(entry.label, "Плавание");
    }

    #[test]
    fn test_training_errors() {
        assert!(matches!(
            parse_training_entry("1000,30m"),
            Err(ParseError::FieldCount {
                expected: 3,
                found: 2
            })
        ));
        assert!(matches!(
            parse_training_entry("abc,Бег,30m"),
            Err(ParseError::StepConversion { .. })
        ));
        assert!(matches!(
            parse_training_entry("1000,Бег,30"),
            Err(ParseError::DurationConversion {
                reason: DurationError::MissingUnit,
                ..
            })
        ));
    }
}
