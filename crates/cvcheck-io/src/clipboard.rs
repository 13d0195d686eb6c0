use arboard::Clipboard;

use crate::ExportError;

/// Put `text` on the system clipboard. Blocks on the platform clipboard, so
/// run it off the async workers.
pub fn copy_text_blocking(text: &str) -> Result<(), ExportError> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;

    tracing::debug!("Copied {} chars to clipboard", text.chars().count());
    Ok(())
}

pub async fn copy_text(text: String) -> Result<(), ExportError> {
    tokio::task::spawn_blocking(move || copy_text_blocking(&text))
        .await
        .map_err(|e| ExportError::Task(e.to_string()))?
}
