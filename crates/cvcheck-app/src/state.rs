use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use cvcheck_config::Config;
use cvcheck_core::preferences::PreferenceState;
use tokio::sync::{Mutex, RwLock};

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub preferences: Mutex<PreferenceState>,
    /// Set while a status poller runs; at most one at a time
    pub polling: AtomicBool,
}

impl AppState {
    pub fn new(config: Config, preferences: PreferenceState) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            preferences: Mutex::new(preferences),
            polling: AtomicBool::new(false),
        }
    }
}
