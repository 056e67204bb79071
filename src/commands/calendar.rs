use std::path::Path;

use anyhow::{Context as _, Result};
use owo_colors::OwoColorize;
use sinulog_core::ics::{generate_ics, ics_filename};
use sinulog_core::links::calendar_link;
use tracing::{error, info};

use super::{Context, parse_date_arg};

pub fn run(
    ctx: &Context,
    event: &str,
    date: Option<&str>,
    open: bool,
    ics: Option<&Path>,
) -> Result<()> {
    let row = ctx.schedule.find_event(event, parse_date_arg(date)?)?;

    let url = calendar_link(&row, &ctx.settings)
        .with_context(|| format!("Cannot add '{}' to a calendar", row.name))?;

    println!("{}", format!("Add '{}' to Google Calendar:", row.name).bold());
    println!("  {}", url);

    if let Some(path) = ics {
        let path = if path.is_dir() {
            path.join(ics_filename(&row))
        } else {
            path.to_path_buf()
        };

        let content = generate_ics(&row, &ctx.settings)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!(path = %path.display(), "Wrote ICS file");
        println!("{}", format!("  Saved: {}", path.display()).green());
    }

    if open {
        open::that(url.as_str())
            .inspect_err(|e| error!(url = %url, "Could not open browser: {}", e))
            .context("Could not open browser, please copy the URL above")?;
    }

    Ok(())
}
