pub mod calendar;
pub mod dates;
pub mod day;
pub mod locate;
pub mod locations;
pub mod search;

use std::path::Path;

use anyhow::{Context as _, Result};
use chrono::{NaiveDate, Utc};
use sinulog_core::config::SinulogConfig;
use sinulog_core::dataset::RawDataset;
use sinulog_core::date_key::parse_day;
use sinulog_core::links::ExportSettings;
use sinulog_core::location::LocationRegistry;
use sinulog_core::schedule::Schedule;
use sinulog_core::selection::{Selection, SelectionChange};
use tracing::{debug, info};

/// Everything a command needs, loaded once per invocation.
pub struct Context {
    pub schedule: Schedule,
    pub registry: LocationRegistry,
    pub settings: ExportSettings,
    pub show_unmapped_warning: bool,
}

impl Context {
    pub fn load(data: Option<&Path>) -> Result<Self> {
        let config = SinulogConfig::load().context("Failed to load config")?;

        let raw = match data.map(Path::to_path_buf).or_else(|| config.dataset_path()) {
            Some(path) => {
                info!(path = %path.display(), "Loading dataset");
                RawDataset::load(&path)
                    .with_context(|| format!("Failed to load dataset at {}", path.display()))?
            }
            None => RawDataset::bundled().context("Bundled dataset is malformed")?,
        };

        let schedule = Schedule::normalize(&raw).context("Failed to normalize the schedule")?;
        if schedule.is_empty() {
            anyhow::bail!("The schedule has no events");
        }

        Ok(Context {
            schedule,
            registry: config.location_registry(),
            settings: config.export_settings()?,
            show_unmapped_warning: config.show_unmapped_warning,
        })
    }

    /// Today's date where the festival takes place.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.settings.timezone).date_naive()
    }

    /// A selection positioned on today (or the next festival day).
    pub fn selection(&self) -> Selection {
        let mut selection = Selection::new();
        selection.subscribe(|state, change| log_change(state.date, change));
        selection.initialize(&self.schedule, self.today());
        selection
    }
}

fn log_change(date: Option<NaiveDate>, change: &SelectionChange) {
    debug!(?date, ?change, "Selection changed");
}

/// Parse an optional day argument.
pub fn parse_date_arg(date: Option<&str>) -> Result<Option<NaiveDate>> {
    date.map(parse_day).transpose().map_err(anyhow::Error::from)
}
