//! Configuration types for choice tracking.
//!
//! Loads settings from config.json at startup. Provides the cooldown, the
//! screen orientation assumption, and output locations.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::grid::{GridTracker, VerticalOrigin};

/// Complete tracker configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Minimum time between two reports of the same choice (milliseconds)
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
    /// Where y = 0 is on the host screen; decides which missing tile wins
    #[serde(default)]
    pub vertical_origin: VerticalOrigin,
    /// TSV words with a lower confidence are dropped (0-100)
    #[serde(default)]
    pub min_confidence: f32,
    /// Default log filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Choices CSV file name, relative to the output directory
    #[serde(default = "default_choices_csv")]
    pub choices_csv: String,
}

fn default_cooldown_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_choices_csv() -> String {
    "choices.csv".to_string()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: default_cooldown_ms(),
            vertical_origin: VerticalOrigin::default(),
            min_confidence: 0.0,
            log_level: default_log_level(),
            choices_csv: default_choices_csv(),
        }
    }
}

impl TrackerConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    /// Builds a tracker on the monotonic clock with these settings.
    pub fn build_tracker(&self) -> GridTracker {
        GridTracker::with_settings(self.cooldown(), self.vertical_origin)
    }

    /// Reads configuration from `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist, and an error when it
    /// exists but cannot be read or parsed.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(config))
    }

    /// Turns the outcome of [`TrackerConfig::read`] into a configuration,
    /// logging where it came from.
    ///
    /// A missing or broken file is not an error: the problem is logged and
    /// the defaults are used.
    pub fn resolve(path: &Path, outcome: Result<Option<Self>>) -> Self {
        match outcome {
            Ok(Some(config)) => {
                info!("Config loaded from {}", path.display());
                config
            }
            Ok(None) => {
                info!("{} not found. Using default config.", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("{:#}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Like [`TrackerConfig::resolve`], but a file that exists and cannot be
    /// used is an error instead of a fallback.
    pub fn resolve_strict(path: &Path, outcome: Result<Option<Self>>) -> Result<Self> {
        let outcome = outcome.map_err(|e| {
            error!("{:#}", e);
            e.context("Invalid configuration")
        })?;
        Ok(Self::resolve(path, Ok(outcome)))
    }

    /// Loads configuration from `path`, or returns defaults.
    pub fn load(path: &Path) -> Self {
        info!("Looking for config at: {}", path.display());
        Self::resolve(path, Self::read(path))
    }
}

/// Path of config.json next to the executable.
pub fn default_config_path() -> PathBuf {
    crate::paths::get_exe_dir().join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    #[derive(Clone)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.cooldown(), Duration::from_millis(1000));
        assert_eq!(config.vertical_origin, VerticalOrigin::TopLeft);
        assert_eq!(config.choices_csv, "choices.csv");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TrackerConfig =
            serde_json::from_str(r#"{"cooldown_ms": 250, "vertical_origin": "bottom_left"}"#)
                .unwrap();
        assert_eq!(config.cooldown_ms, 250);
        assert_eq!(config.vertical_origin, VerticalOrigin::BottomLeft);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.min_confidence, 0.0);
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config = TrackerConfig::load(&dir.path().join("config.json"));
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn test_load_invalid_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(TrackerConfig::load(&path), TrackerConfig::default());
    }

    #[test]
    fn test_read_distinguishes_missing_and_broken() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert!(TrackerConfig::read(&path).unwrap().is_none());

        std::fs::write(&path, "{ not json").unwrap();
        let err = TrackerConfig::read(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse"));
    }

    #[test]
    fn test_resolve_logs_parse_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let buf = Arc::new(Mutex::new(Vec::new()));
        let writer = SharedBuf(buf.clone());
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let config = tracing::subscriber::with_default(subscriber, || {
            TrackerConfig::resolve(&path, TrackerConfig::read(&path))
        });
        assert_eq!(config, TrackerConfig::default());

        let logged = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("WARN"));
        assert!(logged.contains("Failed to parse"));
        assert!(logged.contains("Using defaults"));
    }

    #[test]
    fn test_resolve_strict_rejects_broken_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(
            TrackerConfig::resolve_strict(&path, TrackerConfig::read(&path)).unwrap(),
            TrackerConfig::default()
        );

        std::fs::write(&path, "{ not json").unwrap();
        assert!(TrackerConfig::resolve_strict(&path, TrackerConfig::read(&path)).is_err());

        std::fs::write(&path, r#"{"cooldown_ms": 5}"#).unwrap();
        let config = TrackerConfig::resolve_strict(&path, TrackerConfig::read(&path)).unwrap();
        assert_eq!(config.cooldown_ms, 5);
    }

    #[test]
    fn test_build_tracker_uses_settings() {
        let config = TrackerConfig {
            cooldown_ms: 250,
            vertical_origin: VerticalOrigin::BottomLeft,
            ..TrackerConfig::default()
        };
        let grid = config.build_tracker();
        assert_eq!(grid.origin(), VerticalOrigin::BottomLeft);
        assert_eq!(grid.cooldown(), Duration::from_millis(250));
    }

    #[test]
    fn test_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"cooldown_ms": 40, "min_confidence": 60.0}"#).unwrap();

        let config = TrackerConfig::load(&path);
        assert_eq!(config.cooldown_ms, 40);
        assert_eq!(config.min_confidence, 60.0);
    }
}
