//! Core logic for the Sinulog festival schedule browser.
//!
//! This crate holds everything a rendering surface needs:
//! - `dataset` and `schedule` turn the raw date-or-range keyed document into
//!   one bucket of events per calendar day
//! - `selection` and `filter` drive browse mode and search mode
//! - `detail` and `location` extract times and venues from detail strings
//! - `links` and `ics` export an event to a calendar or a map

pub mod config;
pub mod dataset;
pub mod date_key;
pub mod detail;
pub mod error;
pub mod filter;
pub mod ics;
pub mod links;
pub mod location;
pub mod schedule;
pub mod selection;

pub use error::{ScheduleError, ScheduleResult};
