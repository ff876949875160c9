//! Runtime configuration.
//!
//! Loaded from an optional TOML file, then overridden by environment variables:
//!
//! | Variable                  | Field             |
//! |---------------------------|-------------------|
//! | `CART_OPTIMIZER_URL`      | `service_url`     |
//! | `CART_HISTORY_DIR`        | `history_dir`     |
//! | `CART_REQUEST_TIMEOUT_MS` | `request_timeout_ms` |
//!
//! Every field has a default, so an empty file (or no file) is a valid config.

use crate::clients::NotificationTimings;
use reqwest::Url;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const ENV_SERVICE_URL: &str = "CART_OPTIMIZER_URL";
pub const ENV_HISTORY_DIR: &str = "CART_HISTORY_DIR";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "CART_REQUEST_TIMEOUT_MS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Notification phase durations in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub reveal_ms: u64,
    pub dwell_ms: u64,
    pub exit_ms: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        let timings = NotificationTimings::default();
        Self {
            reveal_ms: timings.reveal.as_millis() as u64,
            dwell_ms: timings.dwell.as_millis() as u64,
            exit_ms: timings.exit.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the optimization service; requests go to `{service_url}/optimize`.
    pub service_url: String,
    /// Directory holding the history file.
    pub history_dir: PathBuf,
    /// Storage key of the history list (file stem under `history_dir`).
    pub history_key: String,
    pub request_timeout_ms: u64,
    pub notifications: NotificationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:5050".to_string(),
            history_dir: PathBuf::from("data"),
            history_key: "cartHistory".to_string(),
            request_timeout_ms: 10_000,
            notifications: NotificationSettings::default(),
        }
    }
}

impl Settings {
    /// Reads `path` when given, applies environment overrides and validates.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
                        path: path.to_path_buf(),
                        source,
                    })?;
                toml::from_str(&content)?
            }
            None => Settings::default(),
        };
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parses and validates TOML without touching the environment.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup(ENV_SERVICE_URL) {
            self.service_url = url;
        }
        if let Some(dir) = lookup(ENV_HISTORY_DIR) {
            self.history_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_MS) {
            self.request_timeout_ms =
                raw.trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                        field: ENV_REQUEST_TIMEOUT_MS,
                        reason: e.to_string(),
                    })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.service_url).map_err(|e| ConfigError::InvalidValue {
            field: "service_url",
            reason: e.to_string(),
        })?;
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be greater than zero".into(),
            });
        }
        if self.history_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "history_key",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn notification_timings(&self) -> NotificationTimings {
        NotificationTimings {
            reveal: Duration::from_millis(self.notifications.reveal_ms),
            dwell: Duration::from_millis(self.notifications.dwell_ms),
            exit: Duration::from_millis(self.notifications.exit_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.service_url, "http://127.0.0.1:5050");
        assert_eq!(settings.history_key, "cartHistory");
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
        assert_eq!(settings.notification_timings(), NotificationTimings::default());
    }

    #[test]
    fn test_partial_config() {
        let settings = Settings::from_toml_str(
            r#"
            service_url = "http://optimizer.internal:8080/api"
            request_timeout_ms = 2500

            [notifications]
            dwell_ms = 1000
            "#,
        )
        .unwrap();
        assert_eq!(settings.service_url, "http://optimizer.internal:8080/api");
        assert_eq!(settings.request_timeout_ms, 2500);
        assert_eq!(settings.history_dir, PathBuf::from("data"));
        let timings = settings.notification_timings();
        assert_eq!(timings.dwell, Duration::from_millis(1000));
        assert_eq!(timings.reveal, Duration::from_millis(10));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Settings::from_toml_str(r#"service_url = "not a url""#),
            Err(ConfigError::InvalidValue { field: "service_url", .. })
        ));
        assert!(matches!(
            Settings::from_toml_str("request_timeout_ms = 0"),
            Err(ConfigError::InvalidValue { field: "request_timeout_ms", .. })
        ));
        assert!(matches!(
            Settings::from_toml_str("request_timeout_ms = \"soon\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_SERVICE_URL, "http://10.0.0.2:5050"),
            (ENV_HISTORY_DIR, "/tmp/carts"),
            (ENV_REQUEST_TIMEOUT_MS, " 750 "),
        ]);
        let mut settings = Settings::default();
        settings
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(settings.service_url, "http://10.0.0.2:5050");
        assert_eq!(settings.history_dir, PathBuf::from("/tmp/carts"));
        assert_eq!(settings.request_timeout_ms, 750);

        let err = Settings::default()
            .apply_overrides(|key| (key == ENV_REQUEST_TIMEOUT_MS).then(|| "abc".to_string()))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field: ENV_REQUEST_TIMEOUT_MS, .. }
        ));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(&path, "history_key = \"otherHistory\"\n").unwrap();
        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.history_key, "otherHistory");

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Settings::load(Some(&missing)),
            Err(ConfigError::ReadFile { .. })
        ));
    }
}
