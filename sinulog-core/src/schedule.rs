//! The normalized schedule: one bucket of events per calendar day.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

use crate::dataset::RawDataset;
use crate::date_key::{DateKey, canonical_date};
use crate::detail::Detail;
use crate::error::{ScheduleError, ScheduleResult};
use crate::filter::EventRow;

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEvent {
    pub name: String,
    pub detail: Detail,
}

/// Events of a single day, in the order they were first listed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayEvents {
    events: Vec<ScheduledEvent>,
}

impl DayEvents {
    /// Insert or replace an event by name.
    /// A replaced event keeps its position. Returns true on replacement.
    fn upsert(&mut self, name: &str, detail: &Detail) -> bool {
        match self.events.iter_mut().find(|e| e.name == name) {
            Some(existing) => {
                existing.detail = detail.clone();
                true
            }
            None => {
                self.events.push(ScheduledEvent {
                    name: name.to_string(),
                    detail: detail.clone(),
                });
                false
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ScheduledEvent> {
        self.events.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    days: BTreeMap<NaiveDate, DayEvents>,
}

impl Schedule {
    /// Expand every key of the raw dataset into single days.
    ///
    /// Keys producing the same day are merged; on an event-name collision the
    /// entry listed later in the document wins. Keys that are not dates are
    /// logged and skipped.
    #[instrument(skip_all, fields(keys = raw.len()))]
    pub fn normalize(raw: &RawDataset) -> ScheduleResult<Self> {
        let mut days: BTreeMap<NaiveDate, DayEvents> = BTreeMap::new();

        for entry in raw.entries() {
            let key = match DateKey::parse(&entry.key) {
                Ok(key) => key,
                Err(e) => {
                    warn!(key = %entry.key, "{}, skipping", e);
                    continue;
                }
            };
            let dates = key.days();

            if dates.is_empty() {
                warn!(key = %entry.key, "Date range ends before it starts, skipping");
                continue;
            }

            for date in dates {
                let bucket = days.entry(date).or_default();
                for (name, detail) in &entry.events {
                    if bucket.upsert(name, detail) {
                        debug!(date = %canonical_date(date), event = %name, "Overwrote event from an earlier key");
                    }
                }
            }
        }

        debug!(days = days.len(), "Normalized schedule");

        Ok(Schedule { days })
    }

    /// Normalize the schedule bundled into the binary.
    pub fn bundled() -> ScheduleResult<Self> {
        Self::normalize(&RawDataset::bundled()?)
    }

    /// All days with events, in chronological order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn events_on(&self, date: NaiveDate) -> Option<&DayEvents> {
        self.days.get(&date)
    }

    /// Look a day up by its canonical string, e.g. "january 19, 2025".
    pub fn events_on_canonical(&self, canonical: &str) -> Option<&DayEvents> {
        match DateKey::parse(canonical) {
            Ok(DateKey::Single(date)) => self.events_on(date),
            _ => None,
        }
    }

    /// Days and their events in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &DayEvents)> {
        self.days.iter().map(|(date, events)| (*date, events))
    }

    /// Find an event by name (case-insensitive), on `date` if given,
    /// otherwise on the earliest day it occurs.
    pub fn find_event(&self, name: &str, date: Option<NaiveDate>) -> ScheduleResult<EventRow> {
        let wanted = name.trim().to_lowercase();

        self.iter()
            .filter(|(day, _)| date.is_none_or(|d| d == *day))
            .find_map(|(day, events)| {
                events
                    .iter()
                    .find(|e| e.name.to_lowercase() == wanted)
                    .map(|e| EventRow::new(&e.name, &e.detail, day))
            })
            .ok_or_else(|| match date {
                Some(d) => ScheduleError::EventNotFound(format!("'{}' on {}", name, canonical_date(d))),
                None => ScheduleError::EventNotFound(format!("'{}'", name)),
            })
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
