use cvcheck_types::{AppEvent, UiEvent};

use crate::context::WorkflowContext;

/// Theme and language changes. The new value applies even when saving it
/// fails.
pub async fn handle_preferences(ctx: &WorkflowContext, event: UiEvent) -> anyhow::Result<()> {
    let current = {
        let mut prefs = ctx.state.preferences.lock().await;
        let updated = match event {
            UiEvent::ToggleTheme => prefs.toggle_theme(),
            UiEvent::SetTheme(theme) => prefs.apply_theme(theme),
            UiEvent::SetLanguage(language) => prefs.change_language(language),
            _ => Ok(prefs.current()),
        };

        updated.unwrap_or_else(|e| {
            tracing::warn!("Failed to save preferences: {e}");
            prefs.current()
        })
    };

    tracing::info!(
        theme = current.theme.as_str(),
        language = current.language.code(),
        "Preferences"
    );
    ctx.emit(AppEvent::PreferencesChanged(current)).await;
    Ok(())
}
