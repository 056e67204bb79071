//! User configuration at ~/.config/sinulog/config.toml
//!
//! Every key is optional; a missing file means the defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use ::config::{Config, File};
use serde::Deserialize;

use crate::error::{ScheduleError, ScheduleResult};
use crate::links::ExportSettings;
use crate::location::{Coordinate, LocationRegistry};

static DEFAULT_FESTIVAL_NAME: &str = "Sinulog 2025";
static DEFAULT_TIMEZONE: &str = "Asia/Manila";
static DEFAULT_EVENT_DURATION: &str = "2h";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SinulogConfig {
    /// Dataset to load instead of the bundled one.
    pub dataset: Option<PathBuf>,

    pub festival_name: String,

    /// IANA timezone of the times in the dataset.
    pub timezone: String,

    /// Length given to exported events, e.g. "2h" or "90m".
    pub event_duration: String,

    /// Flag events whose venues are not in the registry.
    pub show_unmapped_warning: bool,

    /// Extra venues, as a `[locations]` table of `name = { lat = .., lng = .. }`.
    pub locations: BTreeMap<String, Coordinate>,
}

impl Default for SinulogConfig {
    fn default() -> Self {
        SinulogConfig {
            dataset: None,
            festival_name: DEFAULT_FESTIVAL_NAME.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            event_duration: DEFAULT_EVENT_DURATION.to_string(),
            show_unmapped_warning: true,
            locations: BTreeMap::new(),
        }
    }
}

impl SinulogConfig {
    pub fn config_path() -> ScheduleResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ScheduleError::Config("Could not determine config directory".into()))?
            .join("sinulog");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, falling back to defaults when there is none.
    pub fn load() -> ScheduleResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> ScheduleResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| ScheduleError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ScheduleError::Config(e.to_string()))
    }

    /// Dataset path with `~` expanded.
    pub fn dataset_path(&self) -> Option<PathBuf> {
        self.dataset.as_ref().map(|path| {
            PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
        })
    }

    pub fn timezone(&self) -> ScheduleResult<Tz> {
        self.timezone
            .parse()
            .map_err(|_| ScheduleError::Config(format!("Unknown timezone '{}'", self.timezone)))
    }

    pub fn event_duration(&self) -> ScheduleResult<chrono::Duration> {
        let duration = humantime::parse_duration(&self.event_duration).map_err(|e| {
            ScheduleError::Config(format!("Invalid event_duration '{}': {}", self.event_duration, e))
        })?;

        chrono::Duration::from_std(duration)
            .map_err(|e| ScheduleError::Config(format!("event_duration out of range: {}", e)))
    }

    pub fn export_settings(&self) -> ScheduleResult<ExportSettings> {
        Ok(ExportSettings {
            festival_name: self.festival_name.clone(),
            timezone: self.timezone()?,
            duration: self.event_duration()?,
        })
    }

    /// Built-in venues plus the ones from `[locations]`.
    pub fn location_registry(&self) -> LocationRegistry {
        let mut registry = LocationRegistry::default();
        registry.extend(
            self.locations
                .iter()
                .map(|(name, coordinate)| (name.clone(), *coordinate)),
        );
        registry
    }
}
