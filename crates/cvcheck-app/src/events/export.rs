use std::path::PathBuf;

use chrono::Local;
use cvcheck_core::results::FEEDBACK_COPIED;
use cvcheck_report::{format_feedback_today, generate_pdf, report_filename};
use cvcheck_types::{AnalysisResult, AppEvent, Route};

use crate::context::WorkflowContext;
use crate::events::ViewState;

const NO_RESULTS: &str = "No analysis results to export";

/// The loaded result, when the results view is showing one
fn loaded(view: &ViewState) -> Option<&AnalysisResult> {
    match view.route {
        Route::Results { .. } => view.results.data.as_ref(),
        _ => None,
    }
}

pub async fn handle_copy(ctx: &WorkflowContext, view: &ViewState) -> anyhow::Result<()> {
    let Some(result) = loaded(view) else {
        ctx.emit(AppEvent::ExportFailed(NO_RESULTS.into())).await;
        return Ok(());
    };

    let text = format_feedback_today(result);
    match cvcheck_io::copy_text(text).await {
        Ok(()) => ctx.emit(AppEvent::Toast(FEEDBACK_COPIED.into())).await,
        Err(e) => {
            tracing::warn!("Copy failed: {e}");
            ctx.emit(AppEvent::ExportFailed(e.to_string())).await;
        }
    }

    Ok(())
}

pub async fn handle_print(ctx: &WorkflowContext, view: &ViewState) -> anyhow::Result<()> {
    let event = match loaded(view) {
        Some(result) => AppEvent::FeedbackText(format_feedback_today(result)),
        None => AppEvent::ExportFailed(NO_RESULTS.into()),
    };
    ctx.emit(event).await;
    Ok(())
}

pub async fn handle_download(
    ctx: &WorkflowContext,
    view: &ViewState,
    dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let Some(result) = loaded(view) else {
        ctx.emit(AppEvent::ExportFailed(NO_RESULTS.into())).await;
        return Ok(());
    };

    let today = Local::now().date_naive();
    let bytes = match generate_pdf(result, today) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("PDF generation failed: {e}");
            ctx.emit(AppEvent::ExportFailed(format!("Failed to generate PDF: {e}")))
                .await;
            return Ok(());
        }
    };

    let dir = dir.unwrap_or_else(|| PathBuf::from("."));
    match cvcheck_io::save_report(&dir, &report_filename(today), &bytes).await {
        Ok(path) => ctx.emit(AppEvent::ReportSaved(path)).await,
        Err(e) => {
            tracing::warn!("Saving report failed: {e}");
            ctx.emit(AppEvent::ExportFailed(e.to_string())).await;
        }
    }

    Ok(())
}
