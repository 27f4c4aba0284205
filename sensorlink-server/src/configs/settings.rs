use std::env;
use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use time::UtcOffset;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

/// Reference timezone used for every timestamp the relay emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timezone {
    pub utc_offset_hours: i8,
}

impl Timezone {
    pub fn offset(&self) -> Result<UtcOffset, ConfigError> {
        UtcOffset::from_hms(self.utc_offset_hours, 0, 0).map_err(|e| {
            ConfigError::Message(format!(
                "invalid utc offset {}: {e}",
                self.utc_offset_hours
            ))
        })
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self { utc_offset_hours: 7 }
    }
}

/// Published spreadsheet backing the history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    pub base_url: String,
    pub spreadsheet_id: String,
    pub sheet_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    #[serde(default)]
    pub timezone: Timezone,
    pub sheet: Option<Sheet>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        Self::load("configs", &run_mode)
    }

    pub fn load(dir: impl AsRef<Path>, run_mode: &str) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();

        let settings: Settings = Config::builder()
            .add_source(File::from(dir.join("default")))
            .add_source(File::from(dir.join(run_mode)).required(false))
            .add_source(
                Environment::with_prefix("SENSORLINK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.timezone.offset()?;

        Ok(settings)
    }
}
