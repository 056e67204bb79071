//! ICS export of a single event, for calendars that import files.

use icalendar::{Calendar, Component, EventLike};

use crate::error::ScheduleResult;
use crate::filter::EventRow;
use crate::links::{EventWindow, ExportSettings, compact_utc};

/// Generate .ics content for an event row.
pub fn generate_ics(row: &EventRow, settings: &ExportSettings) -> ScheduleResult<String> {
    let window = EventWindow::for_row(row, settings)?;

    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event_uid(row));
    ics_event.summary(&row.name);
    ics_event.add_property("DTSTAMP", compact_utc(&chrono::Utc::now()));
    ics_event.add_property("DTSTART", compact_utc(&window.start));
    ics_event.add_property("DTEND", compact_utc(&window.end));
    ics_event.description(&settings.description_for(&row.name));

    if !window.places.is_empty() {
        ics_event.location(&window.location());
    }

    cal.push(ics_event.done());
    let cal = cal.done();

    Ok(strip_ics_bloat(&cal.to_string()))
}

/// Stable per-day identifier, so re-importing the same event updates it.
pub fn event_uid(row: &EventRow) -> String {
    format!(
        "{}-{}@sinulog",
        slug::slugify(&row.name),
        row.date.format("%Y%m%d")
    )
}

/// File name for an exported event, e.g. "2025-01-19-opening-mass.ics".
pub fn ics_filename(row: &EventRow) -> String {
    format!("{}-{}.ics", row.date.format("%Y-%m-%d"), slug::slugify(&row.name))
}

/// Replace the icalendar crate's PRODID and drop the default CALSCALE.
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:SINULOG\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::Detail;
    use crate::error::ScheduleError;
    use chrono::NaiveDate;

    fn row(detail: &str) -> EventRow {
        EventRow::new(
            "Opening Mass",
            &Detail::new(detail),
            NaiveDate::from_ymd_opt(2025, 1, 19).unwrap(),
        )
    }

    #[test]
    fn test_generate_ics_event_fields() {
        let ics = generate_ics(&row("[7:00 AM, Basilica del Sto. Nino]"), &ExportSettings::default()).unwrap();

        assert!(ics.contains("BEGIN:VEVENT"), "ICS:\n{}", ics);
        assert!(ics.contains("SUMMARY:Opening Mass"), "ICS:\n{}", ics);
        assert!(ics.contains("DTSTART:20250118T230000Z"), "ICS:\n{}", ics);
        assert!(ics.contains("DTEND:20250119T010000Z"), "ICS:\n{}", ics);
        assert!(ics.contains("LOCATION:Basilica del Sto. Nino"), "ICS:\n{}", ics);
        assert!(ics.contains("UID:opening-mass-20250119@sinulog"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_ics_is_trimmed() {
        let ics = generate_ics(&row("[7:00 AM, Basilica del Sto. Nino]"), &ExportSettings::default()).unwrap();

        assert!(ics.contains("PRODID:SINULOG"));
        assert!(!ics.contains("CALSCALE"));
        assert_eq!(ics.lines().filter(|l| l.starts_with("DTSTAMP")).count(), 1);
    }

    #[test]
    fn test_generate_ics_without_places_has_no_location() {
        let ics = generate_ics(&row("[7:00 AM]"), &ExportSettings::default()).unwrap();
        assert!(!ics.contains("LOCATION"));
    }

    #[test]
    fn test_generate_ics_requires_a_time() {
        assert!(matches!(
            generate_ics(&row("[Sunrise, SRP]"), &ExportSettings::default()),
            Err(ScheduleError::TimeOfDay(_))
        ));
    }

    #[test]
    fn test_ics_filename() {
        assert_eq!(ics_filename(&row("[7:00 AM]")), "2025-01-19-opening-mass.ics");
    }
}
