//! Application-level configuration loading: outfit limits, snapshot location and day boundary.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use time::{Date, OffsetDateTime, UtcOffset};
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "LAUNDRY_CLOSET_CONFIG_PATH";
/// Number of suggestions the closet UI asks for.
const DEFAULT_OUTFIT_COUNT: usize = 6;
const DEFAULT_MAX_OUTFIT_COUNT: usize = 24;
const DEFAULT_DATA_FILE: &str = "data/closet.json";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    default_outfit_count: usize,
    max_outfit_count: usize,
    data_file: PathBuf,
    utc_offset: Option<UtcOffset>,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        default_outfits = app_config.default_outfit_count,
                        max_outfits = app_config.max_outfit_count,
                        "loaded closet config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a configuration document. Omitted keys keep their defaults.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }

    /// Number of outfits suggested when the client does not ask for a count.
    pub fn default_outfit_count(&self) -> usize {
        self.default_outfit_count
    }

    /// Largest number of outfits a single request may ask for.
    pub fn max_outfit_count(&self) -> usize {
        self.max_outfit_count
    }

    /// Path of the JSON snapshot used by the local garment store.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Pin the day boundary to a fixed UTC offset.
    pub fn with_utc_offset(mut self, offset: UtcOffset) -> Self {
        self.utc_offset = Some(offset);
        self
    }

    /// Current calendar date as the closet owner sees it.
    ///
    /// Uses the configured offset, else the host's local offset, else UTC.
    pub fn today(&self) -> Date {
        let now = OffsetDateTime::now_utc();
        let offset = self
            .utc_offset
            .or_else(|| UtcOffset::local_offset_at(now).ok())
            .unwrap_or(UtcOffset::UTC);
        now.to_offset(offset).date()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_outfit_count: DEFAULT_OUTFIT_COUNT,
            max_outfit_count: DEFAULT_MAX_OUTFIT_COUNT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            utc_offset: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    outfits: RawOutfits,
    #[serde(default)]
    storage: RawStorage,
    #[serde(default)]
    utc_offset_minutes: Option<i16>,
}

#[derive(Debug, Default, Deserialize)]
struct RawOutfits {
    default_count: Option<usize>,
    max_count: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct RawStorage {
    data_file: Option<PathBuf>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = AppConfig::default();
        let max_outfit_count = value
            .outfits
            .max_count
            .filter(|max| *max > 0)
            .unwrap_or(defaults.max_outfit_count);
        let default_outfit_count = value
            .outfits
            .default_count
            .filter(|count| *count > 0)
            .unwrap_or(defaults.default_outfit_count)
            .min(max_outfit_count);
        let utc_offset = value.utc_offset_minutes.and_then(|minutes| {
            match UtcOffset::from_whole_seconds(i32::from(minutes) * 60) {
                Ok(offset) => Some(offset),
                Err(err) => {
                    warn!(minutes, error = %err, "ignoring out-of-range utc offset");
                    None
                }
            }
        });

        Self {
            default_outfit_count,
            max_outfit_count,
            data_file: value.storage.data_file.unwrap_or(defaults.data_file),
            utc_offset,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_keeps_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config.default_outfit_count(), 6);
        assert_eq!(config.max_outfit_count(), 24);
        assert_eq!(config.data_file(), Path::new("data/closet.json"));
    }

    #[test]
    fn default_count_never_exceeds_the_maximum() {
        let config =
            AppConfig::from_json(r#"{ "outfits": { "default_count": 10, "max_count": 4 } }"#)
                .unwrap();
        assert_eq!(config.max_outfit_count(), 4);
        assert_eq!(config.default_outfit_count(), 4);
    }

    #[test]
    fn zero_counts_fall_back_to_defaults() {
        let config =
            AppConfig::from_json(r#"{ "outfits": { "default_count": 0, "max_count": 0 } }"#)
                .unwrap();
        assert_eq!(config.default_outfit_count(), 6);
        assert_eq!(config.max_outfit_count(), 24);
    }

    #[test]
    fn utc_offset_shifts_the_calendar_day() {
        let ahead = AppConfig::default()
            .with_utc_offset(UtcOffset::from_hms(14, 0, 0).unwrap())
            .today();
        let behind = AppConfig::default()
            .with_utc_offset(UtcOffset::from_hms(-12, 0, 0).unwrap())
            .today();
        // 26 hours apart: always one or two days
        let gap = (ahead - behind).whole_days();
        assert!((1..=2).contains(&gap));
    }

    #[test]
    fn out_of_range_offset_is_ignored() {
        let config = AppConfig::from_json(r#"{ "utc_offset_minutes": 3000 }"#).unwrap();
        assert!(config.utc_offset.is_none());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(AppConfig::from_json("{ outfits").is_err());
    }
}
