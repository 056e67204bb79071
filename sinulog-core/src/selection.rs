//! The mutable selection a rendering surface works from.
//!
//! `Selection` owns the state and notifies subscribers after every change;
//! rendering code reads the state and calls the pure filter functions.

use std::fmt;

use chrono::NaiveDate;

use crate::detail::Detail;
use crate::filter::{EventRow, filter_events};
use crate::location::{Coordinate, DEFAULT_CENTER, LocationRegistry, Resolution};
use crate::schedule::Schedule;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    /// Selected day, None until initialized.
    pub date: Option<NaiveDate>,
    pub query: String,
    /// Set by an explicit search submission.
    pub searching: bool,
    pub location: Option<Coordinate>,
}

impl SelectionState {
    /// Search mode needs both a submitted search and some non-blank text.
    pub fn is_search_mode(&self) -> bool {
        self.searching && !self.query.trim().is_empty()
    }

    pub fn map_center(&self) -> Coordinate {
        self.location.unwrap_or(DEFAULT_CENTER)
    }
}

/// What changed in the last transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionChange {
    Initialized(Option<NaiveDate>),
    DateSelected(NaiveDate),
    QueryChanged,
    SearchSubmitted,
    SearchCleared,
    LocationSelected(Coordinate),
}

type Subscriber = Box<dyn FnMut(&SelectionState, &SelectionChange)>;

#[derive(Default)]
pub struct Selection {
    state: SelectionState,
    subscribers: Vec<Subscriber>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Register a callback invoked after every state change.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&SelectionState, &SelectionChange) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Select today if the schedule has it, else the next scheduled day,
    /// else the first day of the schedule.
    pub fn initialize(&mut self, schedule: &Schedule, today: NaiveDate) {
        self.state.date = initial_date(schedule, today);
        self.notify(SelectionChange::Initialized(self.state.date));
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.state.date = Some(date);
        self.notify(SelectionChange::DateSelected(date));
    }

    /// Update the search text without entering search mode.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
        self.notify(SelectionChange::QueryChanged);
    }

    pub fn submit_search(&mut self) {
        self.state.searching = true;
        self.notify(SelectionChange::SearchSubmitted);
    }

    pub fn clear_search(&mut self) {
        self.state.query.clear();
        self.state.searching = false;
        self.notify(SelectionChange::SearchCleared);
    }

    /// Point the map at an event's first known venue.
    /// The selection is left unchanged when no venue is known.
    pub fn select_event(&mut self, detail: &Detail, registry: &LocationRegistry) -> Resolution {
        let places = detail.parse_or_default().places;
        let resolution = registry.resolve(&places);

        if let Some(coordinate) = resolution.coordinate() {
            self.state.location = Some(coordinate);
            self.notify(SelectionChange::LocationSelected(coordinate));
        }
        resolution
    }

    pub fn is_search_mode(&self) -> bool {
        self.state.is_search_mode()
    }

    /// Rows for the current state.
    pub fn rows(&self, schedule: &Schedule) -> Vec<EventRow> {
        filter_events(&self.state, schedule)
    }

    fn notify(&mut self, change: SelectionChange) {
        for subscriber in &mut self.subscribers {
            subscriber(&self.state, &change);
        }
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Selection")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// The day a fresh selection starts on.
pub fn initial_date(schedule: &Schedule, today: NaiveDate) -> Option<NaiveDate> {
    schedule
        .dates()
        .find(|date| *date >= today)
        .or_else(|| schedule.dates().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RawDataset;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn schedule() -> Schedule {
        let raw = RawDataset::from_json(
            r#"{
                "January 9 2025": { "Walk with Jesus": "[4:00 AM, Fuente Osmeña & Basilica del Sto. Nino]" },
                "January 19 2025": { "Sinulog Grand Parade": "[8:00 AM, Cebu South Road & SRP]" }
            }"#,
        )
        .unwrap();
        Schedule::normalize(&raw).unwrap()
    }

    #[test]
    fn test_initial_date_prefers_today_then_next_then_first() {
        let schedule = schedule();

        assert_eq!(initial_date(&schedule, ymd(2025, 1, 9)), Some(ymd(2025, 1, 9)));
        assert_eq!(initial_date(&schedule, ymd(2025, 1, 10)), Some(ymd(2025, 1, 19)));
        assert_eq!(initial_date(&schedule, ymd(2026, 1, 1)), Some(ymd(2025, 1, 9)));
        assert_eq!(initial_date(&Schedule::default(), ymd(2025, 1, 1)), None);
    }

    #[test]
    fn test_search_lifecycle() {
        let schedule = schedule();
        let mut selection = Selection::new();
        selection.initialize(&schedule, ymd(2025, 1, 1));

        selection.set_query("parade");
        assert!(!selection.is_search_mode());
        assert_eq!(selection.rows(&schedule)[0].name, "Walk with Jesus");

        selection.submit_search();
        assert!(selection.is_search_mode());
        assert_eq!(selection.rows(&schedule)[0].name, "Sinulog Grand Parade");

        selection.clear_search();
        assert!(!selection.state().searching);
        assert!(selection.state().query.is_empty());
        assert_eq!(selection.state().date, Some(ymd(2025, 1, 9)));
    }

    #[test]
    fn test_submit_blank_search_stays_in_browse_mode() {
        let mut selection = Selection::new();
        selection.set_query("   ");
        selection.submit_search();
        assert!(!selection.is_search_mode());
    }

    #[test]
    fn test_select_event_moves_map() {
        let registry = LocationRegistry::default();
        let mut selection = Selection::new();
        assert_eq!(selection.state().map_center(), DEFAULT_CENTER);

        let detail = Detail::new("[8:00 AM, Cebu South Road & SRP]");
        let resolution = selection.select_event(&detail, &registry);

        assert_eq!(
            resolution,
            Resolution::Mapped {
                place: "SRP".into(),
                coordinate: Coordinate::new(10.2673, 123.8827),
            }
        );
        assert_eq!(resolution.coordinate(), Some(selection.state().map_center()));

        let unmapped = Detail::new("[8:00 AM, Cebu City Sports Center]");
        assert_eq!(selection.select_event(&unmapped, &registry), Resolution::Unmapped);
        assert_eq!(selection.state().location, Some(Coordinate::new(10.2673, 123.8827)));
    }

    #[test]
    fn test_subscribers_see_every_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut selection = Selection::new();
        selection.subscribe(move |state, change| {
            sink.borrow_mut().push((change.clone(), state.searching));
        });

        selection.select_date(ymd(2025, 1, 19));
        selection.set_query("mass");
        selection.submit_search();
        selection.clear_search();

        assert_eq!(
            *seen.borrow(),
            vec![
                (SelectionChange::DateSelected(ymd(2025, 1, 19)), false),
                (SelectionChange::QueryChanged, false),
                (SelectionChange::SearchSubmitted, true),
                (SelectionChange::SearchCleared, false),
            ]
        );
    }
}
