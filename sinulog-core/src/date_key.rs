//! Dataset date keys: a single calendar day or a textual day range.
//!
//! Keys look like `"January 19 2025"` or `"January 19 2025 - January 21 2025"`.
//! Parts missing from a range end are taken from its start, so
//! `"January 19 - 21 2025"` spans three days as well.

use std::fmt;
use std::str::FromStr;

use chrono::{Month, NaiveDate};

use crate::error::{ScheduleError, ScheduleResult};

/// Separator between the two endpoints of a range key.
pub const RANGE_SEPARATOR: char = '-';

/// A parsed dataset key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKey {
    Single(NaiveDate),
    Range { start: NaiveDate, end: NaiveDate },
}

impl DateKey {
    pub fn parse(key: &str) -> ScheduleResult<Self> {
        match key.split_once(RANGE_SEPARATOR) {
            Some((start, end)) => parse_range(key, start, end),
            None => {
                let date = PartialDate::parse(key)
                    .and_then(|partial| partial.complete())
                    .ok_or_else(|| ScheduleError::InvalidDate(key.trim().to_string()))?;
                Ok(DateKey::Single(date))
            }
        }
    }

    /// Every calendar day covered by this key, both bounds included.
    /// A range whose end precedes its start covers no days.
    pub fn days(&self) -> Vec<NaiveDate> {
        match *self {
            DateKey::Single(date) => vec![date],
            DateKey::Range { start, end } => start.iter_days().take_while(|d| *d <= end).collect(),
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, DateKey::Range { .. })
    }
}

impl FromStr for DateKey {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateKey::parse(s)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DateKey::Single(date) => write!(f, "{}", canonical_date(*date)),
            DateKey::Range { start, end } => {
                write!(f, "{} - {}", canonical_date(*start), canonical_date(*end))
            }
        }
    }
}

/// Lowercase long-form date used as the normalized lookup key, e.g. "january 19, 2025".
pub fn canonical_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string().to_lowercase()
}

/// Parse a single day given on the command line.
/// Accepts ISO dates ("2025-01-19") as well as dataset-style dates.
pub fn parse_day(input: &str) -> ScheduleResult<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
        return Ok(date);
    }

    match DateKey::parse(input)? {
        DateKey::Single(date) => Ok(date),
        DateKey::Range { .. } => Err(ScheduleError::InvalidDate(input.trim().to_string())),
    }
}

fn parse_range(key: &str, start: &str, end: &str) -> ScheduleResult<DateKey> {
    let invalid = || ScheduleError::InvalidDate(key.trim().to_string());

    let start = PartialDate::parse(start).ok_or_else(invalid)?;
    let end = PartialDate::parse(end).ok_or_else(invalid)?;

    let end = PartialDate {
        month: end.month.or(start.month),
        day: end.day.or(start.day),
        year: end.year.or(start.year),
    };
    let start = PartialDate {
        year: start.year.or(end.year),
        ..start
    };

    Ok(DateKey::Range {
        start: start.complete().ok_or_else(invalid)?,
        end: end.complete().ok_or_else(invalid)?,
    })
}

/// One endpoint of a key, any part of which may be missing.
#[derive(Debug, Default, Clone, Copy)]
struct PartialDate {
    month: Option<u32>,
    day: Option<u32>,
    year: Option<i32>,
}

impl PartialDate {
    /// Returns None when a token is neither a month name nor a number,
    /// or when a part appears twice.
    fn parse(text: &str) -> Option<Self> {
        let mut partial = PartialDate::default();

        let tokens = text
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty());

        for token in tokens {
            if let Ok(month) = token.parse::<Month>() {
                if partial.month.replace(month.number_from_month()).is_some() {
                    return None;
                }
                continue;
            }

            let number: u32 = token.parse().ok()?;
            if number > 31 {
                if partial.year.replace(i32::try_from(number).ok()?).is_some() {
                    return None;
                }
            } else if partial.day.is_none() {
                partial.day = Some(number);
            } else {
                return None;
            }
        }

        Some(partial)
    }

    fn complete(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }
}
