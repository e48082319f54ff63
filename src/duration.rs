//! Duration literal parsing
//!
//! Log entries carry elapsed time as compound literals such as `"90m"`,
//! `"1h30m"` or `"1.5h"`: one or more `<decimal><unit>` groups with units
//! `ns`, `us` (`µs`, `μs`), `ms`, `s`, `m` and `h`. The bare literal `"0"` is
//! accepted without a unit. Negative spans are rejected.

use std::time::Duration;

use crate::error::DurationError;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SECOND: u64 = 1_000_000_000;
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;

/// Largest representable span, matching a signed 64-bit nanosecond counter.
const MAX_NANOS: u64 = i64::MAX as u64;

/// Parse a duration literal into a [`Duration`].
pub fn parse_duration(literal: &str) -> Result<Duration, DurationError> {
    let mut rest = literal;

    if let Some(stripped) = rest.strip_prefix('-') {
        if stripped.is_empty() {
            return Err(DurationError::MissingNumber);
        }
        return Err(DurationError::Negative);
    }
    if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(if literal.is_empty() {
            DurationError::Empty
        } else {
            DurationError::MissingNumber
        });
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let (nanos, remaining) = parse_component(rest)?;
        total = total.checked_add(nanos).ok_or(DurationError::Overflow)?;
        if total > MAX_NANOS {
            return Err(DurationError::Overflow);
        }
        rest = remaining;
    }

    Ok(Duration::from_nanos(total))
}

/// Parse one `<decimal><unit>` group, returning its length in nanoseconds and
/// the unparsed tail.
fn parse_component(input: &str) -> Result<(u64, &str), DurationError> {
    let (whole, int_digits, rest) = leading_int(input)?;

    let (fraction, scale, frac_digits, rest) = match rest.strip_prefix('.') {
        Some(after_dot) => leading_fraction(after_dot),
        None => (0, 1.0, 0, rest),
    };

    if int_digits == 0 && frac_digits == 0 {
        return Err(DurationError::MissingNumber);
    }

    let unit_len = rest
        .char_indices()
        .find(|(_, c)| *c == '.' || c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    if unit_len == 0 {
        return Err(DurationError::MissingUnit);
    }
    let (unit, rest) = rest.split_at(unit_len);
    let unit_nanos = unit_to_nanos(unit)?;

    let mut nanos = whole
        .checked_mul(unit_nanos)
        .filter(|n| *n <= MAX_NANOS)
        .ok_or(DurationError::Overflow)?;

    if fraction > 0 {
        let extra = (fraction as f64 * (unit_nanos as f64 / scale)) as u64;
        nanos = nanos
            .checked_add(extra)
            .filter(|n| *n <= MAX_NANOS)
            .ok_or(DurationError::Overflow)?;
    }

    Ok((nanos, rest))
}

/// Consume leading ASCII digits as an integer.
fn leading_int(input: &str) -> Result<(u64, usize, &str), DurationError> {
    let digits = input.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    for b in input[..digits].bytes() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .filter(|v| *v <= MAX_NANOS)
            .ok_or(DurationError::Overflow)?;
    }
    Ok((value, digits, &input[digits..]))
}

/// Consume fraction digits after the decimal point. Digits beyond what fits in
/// the accumulator are dropped rather than treated as an error.
fn leading_fraction(input: &str) -> (u64, f64, usize, &str) {
    let digits = input.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    let mut scale = 1.0;
    let mut saturated = false;
    for b in input[..digits].bytes() {
        if saturated {
            continue;
        }
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .filter(|v| *v <= MAX_NANOS)
        {
            Some(next) => {
                value = next;
                scale *= 10.0;
            }
            None => saturated = true,
        }
    }
    (value, scale, digits, &input[digits..])
}

fn unit_to_nanos(unit: &str) -> Result<u64, DurationError> {
    match unit {
        "ns" => Ok(1),
        "us" | "µs" | "μs" => Ok(NANOS_PER_MICRO),
        "ms" => Ok(NANOS_PER_MILLI),
        "s" => Ok(NANOS_PER_SECOND),
        "m" => Ok(NANOS_PER_MINUTE),
        "h" => Ok(NANOS_PER_HOUR),
        other => Err(DurationError::UnknownUnit(other.to_string())),
    }
}

/// Express a duration in fractional hours: whole hours plus the remainder
/// scaled separately, so whole-hour spans convert exactly.
pub fn hours(duration: Duration) -> f64 {
    let nanos = duration.as_nanos();
    let whole = nanos / u128::from(NANOS_PER_HOUR);
    let rem = nanos % u128::from(NANOS_PER_HOUR);
    whole as f64 + rem as f64 / NANOS_PER_HOUR as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_units() {
        assert_eq!(parse_duration("90m").unwrap(), Duration::from_secs(90 * 60));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
        assert_eq!(parse_duration("45s").unwrap(), Duration::from_secs(45));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("7us").unwrap(), Duration::from_micros(7));
        assert_eq!(parse_duration("7µs").unwrap(), Duration::from_micros(7));
        assert_eq!(parse_duration("12ns").unwrap(), Duration::from_nanos(12));
    }

    #[test]
    fn test_compound_literal() {
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(
            parse_duration("1h20m15s").unwrap(),
            Duration::from_secs(3600 + 20 * 60 + 15)
        );
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration(".5m").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("2.m").unwrap(), Duration::from_secs(120));
    }

    #[test]
    fn test_zero_and_sign() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("+0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("0s").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("+10m").unwrap(), Duration::from_secs(600));
    }

    #[test]
    fn test_rejects_malformed_literals() {
        assert_eq!(parse_duration(""), Err(DurationError::Empty));
        assert_eq!(parse_duration("+"), Err(DurationError::MissingNumber));
        assert_eq!(parse_duration("-10m"), Err(DurationError::Negative));
        assert_eq!(parse_duration("10"), Err(DurationError::MissingUnit));
        assert_eq!(parse_duration("h"), Err(DurationError::MissingNumber));
        assert_eq!(parse_duration("."), Err(DurationError::MissingNumber));
        assert_eq!(
            parse_duration("10d"),
            Err(DurationError::UnknownUnit("d".to_string()))
        );
        assert_eq!(
            parse_duration("1h 30m"),
            Err(DurationError::UnknownUnit("h ".to_string()))
        );
    }

    #[test]
    fn test_overflow() {
        assert_eq!(parse_duration("3000000h"), Err(DurationError::Overflow));
        assert_eq!(
            parse_duration("99999999999999999999s"),
            Err(DurationError::Overflow)
        );
    }

    #[test]
    fn test_hours() {
        assert!((hours(Duration::from_secs(1800)) - 0.5).abs() < 1e-12);
        assert_eq!(hours(Duration::ZERO), 0.0);
    }

    #[test]
    fn test_hours_splits_whole_and_remainder() {
        assert_eq!(hours(Duration::from_secs(3 * 3600)), 3.0);
        assert_eq!(
            hours(Duration::from_secs(3 * 3600 + 1)),
            3.0 + 1e9 / 3.6e12
        );
        assert_eq!(
            hours(parse_duration("1h20m15s").unwrap()),
            1.0 + (20.0 * 60.0 + 15.0) * 1e9 / 3.6e12
        );
    }
}
