//! Occurrence-length parsing for recurring events.
//!
//! Calendar providers store the length of each occurrence of a recurring
//! event as an RFC 5545 style duration. In practice they only ever emit a
//! seconds count (`P3600S`), so that is the only form accepted here, along
//! with the standard `PT3600S` spelling. Durations with week, day, hour or
//! minute components are rejected with [`DurationError`] rather than
//! approximated.

use chrono::TimeDelta;
use thiserror::Error;

/// Errors produced by [`parse_duration`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("duration is empty")]
    Empty,

    #[error("duration {input:?} does not start with the 'P' designator")]
    MissingDesignator { input: String },

    #[error("negative duration {input:?} is not supported")]
    Negative { input: String },

    #[error("duration {input:?} has no numeric value")]
    MissingValue { input: String },

    #[error("duration {input:?} has no unit designator")]
    MissingUnit { input: String },

    #[error("duration {input:?} uses unsupported component '{component}', only seconds are supported")]
    UnsupportedComponent { input: String, component: char },

    #[error("unexpected character '{found}' in duration {input:?}")]
    Unexpected { input: String, found: char },

    #[error("duration {input:?} is out of range")]
    Overflow { input: String },
}

/// Parses a seconds-only duration such as `P3600S` or `PT3600S`.
///
/// Surrounding whitespace is ignored. A leading `+` is accepted, a leading
/// `-` is rejected.
pub fn parse_duration(input: &str) -> Result<TimeDelta, DurationError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(DurationError::Empty);
    }

    let owned = || input.to_string();

    let text = text.strip_prefix('+').unwrap_or(text);
    if text.starts_with('-') {
        return Err(DurationError::Negative { input: owned() });
    }

    let body = text
        .strip_prefix('P')
        .ok_or_else(|| DurationError::MissingDesignator { input: owned() })?;
    let body = body.strip_prefix('T').unwrap_or(body);

    let digits_end = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    let (digits, unit) = body.split_at(digits_end);

    let mut rest = unit.chars();
    match (rest.next(), rest.next()) {
        (Some('S'), None) => {}
        (None, _) => return Err(DurationError::MissingUnit { input: owned() }),
        (Some('S'), Some(found)) => {
            return Err(DurationError::Unexpected {
                input: owned(),
                found,
            });
        }
        (Some(component @ ('W' | 'D' | 'H' | 'M' | 'T' | 'Y')), _) => {
            return Err(DurationError::UnsupportedComponent {
                input: owned(),
                component,
            });
        }
        (Some(found), _) => {
            return Err(DurationError::Unexpected {
                input: owned(),
                found,
            });
        }
    }

    if digits.is_empty() {
        return Err(DurationError::MissingValue { input: owned() });
    }

    let seconds: i64 = digits
        .parse()
        .map_err(|_| DurationError::Overflow { input: owned() })?;
    TimeDelta::try_seconds(seconds).ok_or_else(|| DurationError::Overflow { input: owned() })
}

/// Parses a seconds-only duration and returns it in milliseconds.
pub fn parse_duration_millis(input: &str) -> Result<i64, DurationError> {
    parse_duration(input).map(|d| d.num_milliseconds())
}
