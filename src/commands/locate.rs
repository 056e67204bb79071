use anyhow::{Context as _, Result};
use owo_colors::OwoColorize;
use sinulog_core::date_key::canonical_date;
use sinulog_core::links::maps_link;
use sinulog_core::location::Resolution;
use tracing::error;

use super::{Context, parse_date_arg};

pub fn run(ctx: &Context, event: &str, date: Option<&str>, open: bool) -> Result<()> {
    let row = ctx.schedule.find_event(event, parse_date_arg(date)?)?;
    let parsed = row.detail.parse_or_default();

    println!("{} ({})", row.name.bold(), canonical_date(row.date));

    let mut selection = ctx.selection();
    match selection.select_event(&row.detail, &ctx.registry) {
        Resolution::Mapped { place, coordinate } => {
            println!("  📍 {} {}", place, format!("({})", coordinate).dimmed());
        }
        Resolution::Unmapped => {
            let places = if parsed.places.is_empty() {
                "no venue listed".to_string()
            } else {
                parsed.places.join(", ")
            };
            println!("  {} {}", "⚠ Location not mapped:".yellow(), places);

            if open {
                anyhow::bail!("Cannot open '{}' in maps: its location is not mapped", row.name);
            }
            return Ok(());
        }
    }

    // The maps search uses the first listed venue, as shown in the detail line.
    let first = parsed.places.first().context("Event has no venue")?;
    let url = maps_link(first)?;
    println!("  {}", url.as_str().dimmed());

    if open {
        open::that(url.as_str())
            .inspect_err(|e| error!(url = %url, "Could not open browser: {}", e))
            .context("Could not open browser, please copy the URL above")?;
    }

    Ok(())
}
