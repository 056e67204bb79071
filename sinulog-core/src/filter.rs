//! Browse mode and search mode over the normalized schedule.

use chrono::NaiveDate;

use crate::date_key::canonical_date;
use crate::detail::Detail;
use crate::schedule::Schedule;
use crate::selection::SelectionState;

/// One displayed event: name, detail and the day it happens on.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub name: String,
    pub detail: Detail,
    pub date: NaiveDate,
}

impl EventRow {
    pub fn new(name: &str, detail: &Detail, date: NaiveDate) -> Self {
        EventRow {
            name: name.to_string(),
            detail: detail.clone(),
            date,
        }
    }

    pub fn canonical_date(&self) -> String {
        canonical_date(self.date)
    }
}

/// Rows to display for the current selection.
///
/// In search mode every day is scanned; otherwise only the selected day is
/// listed (nothing when no day is selected).
pub fn filter_events(state: &SelectionState, schedule: &Schedule) -> Vec<EventRow> {
    if state.is_search_mode() {
        return search(schedule, &state.query);
    }

    let Some(date) = state.date else {
        return Vec::new();
    };

    schedule
        .events_on(date)
        .map(|events| {
            events
                .iter()
                .map(|e| EventRow::new(&e.name, &e.detail, date))
                .collect()
        })
        .unwrap_or_default()
}

/// Case-insensitive substring search over event names and detail text.
/// Days are visited chronologically, events in listing order.
pub fn search(schedule: &Schedule, query: &str) -> Vec<EventRow> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    schedule
        .iter()
        .flat_map(|(date, events)| {
            events
                .iter()
                .filter(|e| matches_query(&e.name, &e.detail, &needle))
                .map(move |e| EventRow::new(&e.name, &e.detail, date))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn matches_query(name: &str, detail: &Detail, needle: &str) -> bool {
    name.to_lowercase().contains(needle) || detail.as_str().to_lowercase().contains(needle)
}
