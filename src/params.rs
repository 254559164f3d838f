//! Run parameters and the validation rules for operator input.
//!
//! Validation is kept free of I/O: the prompt loop in [`crate::prompt`]
//! feeds raw answers through these functions and re-asks on error.

use std::collections::BTreeSet;
use std::str::FromStr;

use thiserror::Error;

use crate::density::DensityLevel;

/// Earliest year that may be targeted.
pub const EARLIEST_YEAR: i32 = 2008;

/// Weekday indices run from 0 (Sunday) to 6 (Saturday).
pub const LAST_WEEKDAY: u32 = 6;

/// Everything a synthesis run needs from the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParameters {
    /// Calendar year to fill with commits
    pub target_year: i32,

    /// How many commits an active day receives
    pub density: DensityLevel,

    /// Weekday indices (0 = Sunday) that receive no commits
    pub skipped_weekdays: BTreeSet<u32>,
}

impl RunParameters {
    /// Whether the given weekday index is excluded from the run.
    pub fn skips(&self, weekday: u32) -> bool {
        self.skipped_weekdays.contains(&weekday)
    }
}

/// Read an optionally signed integer from the start of `input`, ignoring
/// whatever follows the digits (`"2024.5"` reads as 2024).
///
/// Returns `None` when no digit follows the sign. Values too large for
/// `i64` saturate.
pub fn leading_int(input: &str) -> Option<i64> {
    let input = input.trim_start();
    let (negative, rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let digits: Vec<i64> = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|b| i64::from(b - b'0'))
        .collect();
    if digits.is_empty() {
        return None;
    }

    let value = digits.iter().fold(0i64, |acc, d| {
        let acc = acc.saturating_mul(10);
        if negative {
            acc.saturating_sub(*d)
        } else {
            acc.saturating_add(*d)
        }
    });
    Some(value)
}

/// Parse a target year, accepting only `EARLIEST_YEAR..=current_year`.
pub fn parse_year(input: &str, current_year: i32) -> Result<i32, ValidationError> {
    let input = input.trim();
    let year = leading_int(input).ok_or_else(|| ValidationError::NotAYear {
        input: input.to_string(),
    })?;

    match i32::try_from(year) {
        Ok(year) if (EARLIEST_YEAR..=current_year).contains(&year) => Ok(year),
        _ => Err(ValidationError::YearOutOfRange {
            year,
            earliest: EARLIEST_YEAR,
            latest: current_year,
        }),
    }
}

/// Parse a density level name, ignoring case and surrounding whitespace.
pub fn parse_density(input: &str) -> Result<DensityLevel, ValidationError> {
    input.parse()
}

impl FromStr for DensityLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(DensityLevel::Low),
            "medium" => Ok(DensityLevel::Medium),
            "high" => Ok(DensityLevel::High),
            _ => Err(ValidationError::UnknownDensity {
                input: s.trim().to_string(),
            }),
        }
    }
}

/// Parse a comma-separated list of weekday indices.
///
/// Lenient: each token is read with [`leading_int`], and tokens without
/// leading digits or outside `0..=6` are dropped rather than reported, so
/// an empty or entirely malformed answer skips nothing.
pub fn parse_skipped_weekdays(input: &str) -> BTreeSet<u32> {
    input
        .split(',')
        .filter_map(leading_int)
        .filter_map(|day| u32::try_from(day).ok())
        .filter(|day| *day <= LAST_WEEKDAY)
        .collect()
}

/// Rejected operator input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{input}' is not a year")]
    NotAYear { input: String },

    #[error("year {year} is outside {earliest}..={latest}")]
    YearOutOfRange { year: i64, earliest: i32, latest: i32 },

    #[error("unknown density level '{input}'")]
    UnknownDensity { input: String },
}
