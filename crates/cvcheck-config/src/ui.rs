use cvcheck_types::Theme;
use serde::{Deserialize, Serialize};

fn default_color() -> bool {
    true
}

fn default_interactive() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Theme used when none was saved and the terminal gives no hint
    #[serde(default)]
    pub fallback_theme: Theme,
    #[serde(default = "default_color")]
    pub color: bool,
    /// Prompt for retries and file paths when attached to a terminal
    #[serde(default = "default_interactive")]
    pub interactive: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            fallback_theme: Theme::default(),
            color: default_color(),
            interactive: default_interactive(),
        }
    }
}
