use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use cvcheck_types::{Language, Preferences, Theme};

use crate::error::StoreError;

pub const THEME_KEY: &str = "theme";
pub const LANGUAGE_KEY: &str = "language";

/// String key/value storage that survives restarts
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// JSON file backed store. The whole map is rewritten on every `set`.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let entries = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data).unwrap_or_else(|e| {
                tracing::warn!("Ignoring corrupt store {}: {e}", path.display());
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&*entries)?)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read the terminal background hint from a `COLORFGBG` value such as `15;0`.
/// Returns `Some(true)` for a dark background.
pub fn prefers_dark(colorfgbg: Option<&str>) -> Option<bool> {
    let background: u8 = colorfgbg?.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(background, 0..=6 | 8))
}

/// Preferences plus the store they are persisted to
pub struct PreferenceState {
    store: Box<dyn KeyValueStore>,
    current: Preferences,
}

impl PreferenceState {
    /// Load saved preferences. Without a saved theme the system hint decides
    /// and the resolved theme is written back.
    pub fn load(store: Box<dyn KeyValueStore>, system_dark: Option<bool>, fallback: Theme) -> Self {
        let saved_theme = store.get(THEME_KEY).and_then(|t| Theme::parse(&t));
        let language = store
            .get(LANGUAGE_KEY)
            .and_then(|code| Language::from_code(&code))
            .unwrap_or_default();

        let mut state = Self {
            store,
            current: Preferences {
                theme: fallback,
                language,
            },
        };

        match saved_theme {
            Some(theme) => state.current.theme = theme,
            None => {
                let theme = match system_dark {
                    Some(true) => Theme::Dark,
                    Some(false) => Theme::Light,
                    None => fallback,
                };
                if let Err(e) = state.apply_theme(theme) {
                    tracing::warn!("Failed to persist initial theme: {e}");
                }
            }
        }

        state
    }

    pub fn current(&self) -> Preferences {
        self.current
    }

    pub fn apply_theme(&mut self, theme: Theme) -> Result<Preferences, StoreError> {
        self.current.theme = theme;
        self.store.set(THEME_KEY, theme.as_str())?;
        Ok(self.current)
    }

    pub fn toggle_theme(&mut self) -> Result<Preferences, StoreError> {
        self.apply_theme(self.current.theme.toggled())
    }

    pub fn change_language(&mut self, language: Language) -> Result<Preferences, StoreError> {
        self.current.language = language;
        self.store.set(LANGUAGE_KEY, language.code())?;
        Ok(self.current)
    }
}
