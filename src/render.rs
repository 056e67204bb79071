//! Terminal rendering for schedule rows and dates.

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use sinulog_core::filter::EventRow;
use sinulog_core::location::LocationRegistry;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Short day label, e.g. "Jan 19".
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// An event row together with what it needs to be displayed.
pub struct RowView<'a> {
    pub row: &'a EventRow,
    pub registry: &'a LocationRegistry,
    /// Search results span several days, so each row shows its own.
    pub show_date: bool,
    pub warn_unmapped: bool,
}

impl Render for RowView<'_> {
    fn render(&self) -> String {
        let parsed = self.row.detail.parse_or_default();
        let mut lines = Vec::new();

        if self.show_date {
            lines.push(format!("  {}", short_date(self.row.date).yellow()));
        }

        let mut title = format!("  {}", self.row.name.bold());
        if self.warn_unmapped && !self.registry.has_location(&parsed.places) {
            title.push_str(&format!("  {}", "⚠ Not Found".yellow()));
        }
        lines.push(title);

        let detail = self.row.detail.formatted();
        if !detail.is_empty() {
            lines.push(format!("    {}", detail.dimmed()));
        }

        lines.join("\n")
    }
}

/// The horizontal date strip, with the selected day highlighted.
pub struct DateStrip<'a> {
    pub dates: &'a [NaiveDate],
    pub selected: Option<NaiveDate>,
}

impl Render for DateStrip<'_> {
    fn render(&self) -> String {
        self.dates
            .iter()
            .map(|date| {
                let label = short_date(*date);
                if Some(*date) == self.selected {
                    format!("[{}]", label).bold().to_string()
                } else {
                    label
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}

pub fn render_rows<'a>(
    rows: &'a [EventRow],
    registry: &'a LocationRegistry,
    show_date: bool,
    warn_unmapped: bool,
) -> String {
    if rows.is_empty() {
        return "  No events found".dimmed().to_string();
    }

    rows.iter()
        .map(|row| {
            RowView {
                row,
                registry,
                show_date,
                warn_unmapped,
            }
            .render()
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
