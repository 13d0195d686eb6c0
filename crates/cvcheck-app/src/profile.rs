use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use cvcheck_config::Config;

const APP_DIR: &str = "cvcheck";
const CONFIG_FILE: &str = "config.json";
const STORE_FILE: &str = "local_storage.json";

/// Per-user config directory, e.g. `~/.config/cvcheck`
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// Directory of the preference store. `data_dir` from config wins.
pub fn data_dir(config: &Config) -> PathBuf {
    if let Some(dir) = &config.data_dir {
        return PathBuf::from(dir);
    }

    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR}")))
}

pub fn store_path(config: &Config) -> PathBuf {
    data_dir(config).join(STORE_FILE)
}

/// Read a config file. Missing sections and fields take their defaults.
fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from {}", path.display());
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)?;
    Ok(config)
}

/// Load the user's config file if present, then apply `CVCHECK_*`
/// environment overrides
pub fn load_user_config() -> anyhow::Result<Config> {
    let file = config_dir().map(|dir| dir.join(CONFIG_FILE));
    load_config_from(file.as_deref(), |key| std::env::var(key).ok())
}

pub fn load_config_from<F>(file: Option<&Path>, lookup: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match file {
        Some(path) if path.exists() => load_config_file(path)?,
        _ => {
            tracing::debug!("No config file, using defaults");
            Config::default()
        }
    };

    config.apply_overrides(lookup);
    Ok(config)
}
