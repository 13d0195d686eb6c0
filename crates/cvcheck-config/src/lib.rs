use std::time::Duration;

use serde::{Deserialize, Serialize};

use self::api::ApiConfig;
use self::polling::PollingConfig;
use self::ui::UiConfig;
use self::upload::UploadConfig;

pub mod api;
pub mod polling;
pub mod ui;
pub mod upload;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub polling: PollingConfig,
    pub upload: UploadConfig,
    pub ui: UiConfig,

    /// Where preferences are persisted. Defaults to the platform data dir.
    pub data_dir: Option<String>,
}

impl Config {
    /// Defaults overridden by `CVCHECK_*` style lookups
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        config.apply_overrides(lookup);
        config
    }

    /// Apply environment-style overrides on top of an already loaded config
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CVCHECK_API_URL") {
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup("CVCHECK_REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.api.request_timeout_secs = timeout;
        }

        if let Some(interval) = lookup("CVCHECK_POLL_INTERVAL_MS").and_then(|v| v.parse().ok()) {
            self.polling.interval_ms = interval;
        }

        if let Some(max) = lookup("CVCHECK_POLL_MAX_ATTEMPTS").and_then(|v| v.parse().ok()) {
            // 0 disables the cap
            self.polling.max_attempts = if max == 0 { None } else { Some(max) };
        }

        if let Some(dir) = lookup("CVCHECK_DATA_DIR") {
            self.data_dir = Some(dir);
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.polling.interval_ms.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_match_service_contract() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.polling.interval_ms, 1000);
        assert_eq!(config.polling.max_attempts, None);
        assert_eq!(config.upload.max_file_size, 10 * 1024 * 1024);
        assert_eq!(config.upload.allowed_extensions, vec!["pdf", "docx"]);
    }

    #[test]
    fn env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CVCHECK_API_URL", "http://cv.internal:8080"),
            ("CVCHECK_POLL_INTERVAL_MS", "250"),
            ("CVCHECK_POLL_MAX_ATTEMPTS", "40"),
            ("CVCHECK_REQUEST_TIMEOUT_SECS", "not-a-number"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://cv.internal:8080");
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.polling.max_attempts, Some(40));
        assert_eq!(config.api.request_timeout_secs, 30);
    }

    #[test]
    fn zero_attempts_disables_cap() {
        let config = Config::from_lookup(|key| {
            (key == "CVCHECK_POLL_MAX_ATTEMPTS").then(|| "0".to_string())
        });
        assert_eq!(config.polling.max_attempts, None);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"polling": {"max_attempts": 120}}"#).unwrap();
        assert_eq!(config.polling.interval_ms, 1000);
        assert_eq!(config.polling.max_attempts, Some(120));
        assert_eq!(config.api.base_url, "http://localhost:5000");
    }
}
