//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{UidriveError, UidriveResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gesture timing parameters.
    #[serde(default)]
    pub interaction: InteractionConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Timing parameters used by the gesture orchestrators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// How long a regular click keeps the pointer down (ms).
    pub click_duration_ms: u64,

    /// Minimum delay inserted after each injected move step (ms).
    pub injection_delay_ms: u64,

    /// How long a scroll-detecting swipe waits for a scroll notification (ms).
    pub scroll_event_timeout_ms: u64,

    /// Long-press dwell used by device providers that cannot report one (ms).
    pub long_press_fallback_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "uidrive_interaction=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            click_duration_ms: 100,
            injection_delay_ms: 5,
            scroll_event_timeout_ms: 500,
            long_press_fallback_ms: 500,
        }
    }
}

impl InteractionConfig {
    pub fn click_duration(&self) -> Duration {
        Duration::from_millis(self.click_duration_ms)
    }

    pub fn injection_delay(&self) -> Duration {
        Duration::from_millis(self.injection_delay_ms)
    }

    pub fn scroll_event_timeout(&self) -> Duration {
        Duration::from_millis(self.scroll_event_timeout_ms)
    }

    pub fn long_press_fallback(&self) -> Duration {
        Duration::from_millis(self.long_press_fallback_ms)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit file.
    pub fn load_from(path: &Path) -> UidriveResult<Self> {
        if !path.exists() {
            return Err(UidriveError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| UidriveError::config(format!("{}: {e}", path.display())))
    }

    /// Save config to the standard location.
    pub fn save(&self) -> UidriveResult<()> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, json)?;
        Ok(())
    }

    /// Where [`AppConfig::load`] and [`AppConfig::save`] look.
    pub fn path() -> PathBuf {
        config_file_path()
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("uidrive").join("config.json")
}
