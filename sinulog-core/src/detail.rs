//! Event detail strings.
//!
//! Details follow the loose convention `"[<time>, <place> & <place> ...]"`.
//! The dataset sometimes stores a list of strings instead of one string; that
//! union is collapsed here, at ingestion, so everything downstream sees a
//! single optional string.

use std::fmt;

use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::error::{ScheduleError, ScheduleResult};

/// Separator between place names in a detail string.
pub const PLACE_SEPARATOR: &str = " & ";

/// The first detail string of an event, if the dataset had one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Detail(Option<String>);

/// Time-of-day and venues extracted from a detail string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDetail {
    pub time: String,
    pub places: Vec<String>,
}

impl Detail {
    pub fn new(text: impl Into<String>) -> Self {
        Detail(Some(text.into()))
    }

    /// Only the first element of a list detail is meaningful.
    pub fn from_list(items: Vec<String>) -> Self {
        Detail(items.into_iter().next())
    }

    pub fn missing() -> Self {
        Detail(None)
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    /// Raw detail text, empty when absent.
    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or_default()
    }

    /// Human-readable detail line: brackets removed, nothing split.
    pub fn formatted(&self) -> String {
        strip_brackets(self.as_str()).trim().to_string()
    }

    /// Split the detail into its time and place names.
    pub fn parse(&self) -> ScheduleResult<ParsedDetail> {
        let text = self
            .0
            .as_deref()
            .ok_or_else(|| ScheduleError::Detail("event has no detail".into()))?;

        let stripped = strip_brackets(text);
        let stripped = stripped.trim();
        if stripped.is_empty() {
            return Err(ScheduleError::Detail(format!("empty detail '{}'", text)));
        }

        let (time, tail) = stripped.split_once(',').unwrap_or((stripped, ""));

        let places = tail
            .split(PLACE_SEPARATOR)
            .map(str::trim)
            .filter(|place| !place.is_empty())
            .map(str::to_string)
            .collect();

        Ok(ParsedDetail {
            time: time.trim().to_string(),
            places,
        })
    }

    /// Like `parse`, but degrades to an empty time and no places.
    /// Meant for rendering code that shows whatever it can.
    pub fn parse_or_default(&self) -> ParsedDetail {
        self.parse().unwrap_or_else(|e| {
            warn!(detail = %self.as_str(), "{}", e);
            ParsedDetail::default()
        })
    }
}

impl From<&str> for Detail {
    fn from(text: &str) -> Self {
        Detail::new(text)
    }
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shape of a detail value in the dataset document.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDetail {
    Text(String),
    List(Vec<String>),
}

impl<'de> Deserialize<'de> for Detail {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let detail = match Option::<RawDetail>::deserialize(deserializer)? {
            Some(RawDetail::Text(text)) => Detail::new(text),
            Some(RawDetail::List(items)) => Detail::from_list(items),
            None => Detail::missing(),
        };
        Ok(detail)
    }
}

fn strip_brackets(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '[' | ']')).collect()
}
