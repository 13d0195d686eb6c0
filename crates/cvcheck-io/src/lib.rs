//! Side effects of exporting a report: the system clipboard and the
//! filesystem.

pub mod clipboard;
pub mod export;

pub use clipboard::copy_text;
pub use export::save_report;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export task failed: {0}")]
    Task(String),
}
