//! Exports of an analysis result: a plain-text block for the clipboard and a
//! paginated PDF report. Both are pure functions of the result and a date.

pub mod layout;
mod metrics;
pub mod pdf;
pub mod text;

pub use layout::{DrawOp, Font, Page, ReportLayout, layout_report};
pub use pdf::{generate_pdf, report_filename};
pub use text::{format_date, format_feedback, format_feedback_today, format_score};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
