//! "Add to calendar" and "open in maps" deep links.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use url::Url;

use crate::error::{ScheduleError, ScheduleResult};
use crate::filter::EventRow;

pub const CALENDAR_ENDPOINT: &str = "https://calendar.google.com/calendar/render";
pub const MAPS_ENDPOINT: &str = "https://www.google.com/maps/search/";

/// How exported events are timed and labelled.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub festival_name: String,
    /// Timezone the dataset's wall-clock times are in.
    pub timezone: Tz,
    /// Events carry no end time, so every export gets this duration.
    pub duration: Duration,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            festival_name: "Sinulog 2025".to_string(),
            timezone: chrono_tz::Asia::Manila,
            duration: Duration::hours(2),
        }
    }
}

impl ExportSettings {
    pub fn description_for(&self, event_name: &str) -> String {
        format!("{} Event: {}", self.festival_name, event_name)
    }
}

/// Start and end of an event in UTC, plus its venues.
#[derive(Debug, Clone, PartialEq)]
pub struct EventWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub places: Vec<String>,
}

impl EventWindow {
    pub fn for_row(row: &EventRow, settings: &ExportSettings) -> ScheduleResult<Self> {
        let parsed = row.detail.parse()?;
        let time = parse_time_of_day(&parsed.time)?;

        let start = settings
            .timezone
            .from_local_datetime(&row.date.and_time(time))
            .earliest()
            .ok_or_else(|| ScheduleError::TimeOfDay(parsed.time.clone()))?
            .with_timezone(&Utc);

        Ok(EventWindow {
            start,
            end: start + settings.duration,
            places: parsed.places,
        })
    }

    pub fn location(&self) -> String {
        self.places.join(", ")
    }
}

/// Parse a clock time like "7:00 AM", "12:30 PM" or "19:00".
///
/// A missing minute part means ":00". 12 AM is midnight and 12 PM is noon.
pub fn parse_time_of_day(text: &str) -> ScheduleResult<NaiveTime> {
    let invalid = || ScheduleError::TimeOfDay(text.trim().to_string());

    let text = text.trim();
    let clock_len = text
        .find(|c: char| !c.is_ascii_digit() && c != ':')
        .unwrap_or(text.len());
    let (clock, suffix) = text.split_at(clock_len);
    let (hours, minutes) = clock.split_once(':').unwrap_or((clock, ""));

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = if minutes.is_empty() {
        0
    } else {
        minutes.parse().map_err(|_| invalid())?
    };

    // Only a bare AM/PM may follow the clock.
    let hours = match suffix.trim().to_uppercase().as_str() {
        "" => hours,
        "AM" if (1..=12).contains(&hours) => hours % 12,
        "PM" if (1..=12).contains(&hours) => hours % 12 + 12,
        _ => return Err(invalid()),
    };

    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(invalid)
}

/// Google Calendar "create event" link for a row.
pub fn calendar_link(row: &EventRow, settings: &ExportSettings) -> ScheduleResult<Url> {
    let window = EventWindow::for_row(row, settings)?;
    let dates = format!("{}/{}", compact_utc(&window.start), compact_utc(&window.end));

    let url = Url::parse_with_params(
        CALENDAR_ENDPOINT,
        &[
            ("action", "TEMPLATE"),
            ("text", row.name.as_str()),
            ("dates", dates.as_str()),
            ("location", window.location().as_str()),
            ("details", settings.description_for(&row.name).as_str()),
        ],
    )?;

    Ok(url)
}

/// Google Maps search link for a free-text place.
pub fn maps_link(query: &str) -> ScheduleResult<Url> {
    Ok(Url::parse_with_params(
        MAPS_ENDPOINT,
        &[("api", "1"), ("query", query)],
    )?)
}

/// UTC timestamp in the compact form calendar links expect, e.g. 20250118T230000Z.
pub fn compact_utc(time: &DateTime<Utc>) -> String {
    time.format("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::Detail;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn row(name: &str, detail: &str) -> EventRow {
        EventRow::new(
            name,
            &Detail::new(detail),
            NaiveDate::from_ymd_opt(2025, 1, 19).unwrap(),
        )
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn query(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("7:00 AM").unwrap(), hm(7, 0));
        assert_eq!(parse_time_of_day("7:30 pm").unwrap(), hm(19, 30));
        assert_eq!(parse_time_of_day("9 PM").unwrap(), hm(21, 0));
        assert_eq!(parse_time_of_day("19:15").unwrap(), hm(19, 15));
    }

    #[test]
    fn test_noon_and_midnight() {
        assert_eq!(parse_time_of_day("12:00 PM").unwrap(), hm(12, 0));
        assert_eq!(parse_time_of_day("12:30 AM").unwrap(), hm(0, 30));
    }

    #[test]
    fn test_invalid_times() {
        assert!(parse_time_of_day("All day").is_err());
        assert!(parse_time_of_day("13:00 PM").is_err());
        assert!(parse_time_of_day("7:75 AM").is_err());
        assert!(parse_time_of_day("").is_err());
    }

    #[test]
    fn test_time_ranges_are_rejected() {
        assert!(matches!(
            parse_time_of_day("10:00 AM - 2:00 PM"),
            Err(ScheduleError::TimeOfDay(_))
        ));
        assert!(parse_time_of_day("7:00 AM onwards").is_err());
        assert_eq!(parse_time_of_day("7:00AM").unwrap(), hm(7, 0));
    }

    #[test]
    fn test_calendar_link() {
        let settings = ExportSettings::default();
        let url = calendar_link(
            &row("Opening Mass", "[7:00 AM, Basilica del Sto. Nino & Plaza Independencia]"),
            &settings,
        )
        .unwrap();

        assert!(url.as_str().starts_with(CALENDAR_ENDPOINT));

        let params = query(&url);
        assert_eq!(params["action"], "TEMPLATE");
        assert_eq!(params["text"], "Opening Mass");
        // 7:00 in Manila is 23:00 UTC the previous day
        assert_eq!(params["dates"], "20250118T230000Z/20250119T010000Z");
        assert_eq!(params["location"], "Basilica del Sto. Nino, Plaza Independencia");
        assert_eq!(params["details"], "Sinulog 2025 Event: Opening Mass");
    }

    #[test]
    fn test_calendar_link_uses_configured_duration_and_zone() {
        let settings = ExportSettings {
            festival_name: "Fiesta".into(),
            timezone: chrono_tz::UTC,
            duration: Duration::minutes(90),
        };

        let url = calendar_link(&row("Fireworks", "[9:00 PM, SM Seaside Cebu]"), &settings).unwrap();
        let params = query(&url);

        assert_eq!(params["dates"], "20250119T210000Z/20250119T223000Z");
        assert_eq!(params["details"], "Fiesta Event: Fireworks");
    }

    #[test]
    fn test_calendar_link_fails_without_time() {
        let settings = ExportSettings::default();
        assert!(matches!(
            calendar_link(&row("Vigil", "[All night, Basilica del Sto. Nino]"), &settings),
            Err(ScheduleError::TimeOfDay(_))
        ));
        assert!(matches!(
            calendar_link(&row("Vigil", "[]"), &settings),
            Err(ScheduleError::Detail(_))
        ));
    }

    #[test]
    fn test_maps_link_encodes_query() {
        let url = maps_link("Fuente Osmeña").unwrap();
        assert!(url.as_str().starts_with("https://www.google.com/maps/search/?api=1&query="));
        assert_eq!(query(&url)["query"], "Fuente Osmeña");
    }
}
