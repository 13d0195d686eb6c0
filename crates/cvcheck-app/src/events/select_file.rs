use std::path::{Path, PathBuf};

use cvcheck_client::{ClientError, UploadFile};
use cvcheck_core::upload::{STATUS_UNAVAILABLE, UPLOAD_FAILED, UPLOAD_NETWORK_FAILED, validate_file};
use cvcheck_types::{AnalysisId, AppEvent, Route, SelectedFile};

use crate::context::{TaskEvent, WorkflowContext};
use crate::events::ViewState;

use super::poll_status::start_status_poller;

/// Message shown when the analyze request fails
pub fn submit_error_message(error: &ClientError) -> String {
    if error.is_transport() {
        return UPLOAD_NETWORK_FAILED.to_string();
    }
    error.server_message().unwrap_or(UPLOAD_FAILED).to_string()
}

pub async fn handle_file_selection(
    ctx: &WorkflowContext,
    view: &mut ViewState,
    path: PathBuf,
) -> anyhow::Result<()> {
    if view.route != Route::Upload {
        tracing::warn!("Ignoring file selection outside the upload view");
        return Ok(());
    }
    if view.upload.processing {
        tracing::warn!("Upload in progress, ignoring {}", path.display());
        return Ok(());
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let rules = ctx.state.config.read().await.upload.clone();

    // Extension first, so a wrong type is reported even for unreadable paths
    if let Err(e) = validate_file(&name, 0, &rules) {
        return reject(ctx, view, e.to_string()).await;
    }

    let size = match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => meta.len(),
        Ok(_) => return reject(ctx, view, format!("{} is not a file", path.display())).await,
        Err(e) => return reject(ctx, view, format!("Cannot read {}: {e}", path.display())).await,
    };

    if let Err(e) = validate_file(&name, size, &rules) {
        return reject(ctx, view, e.to_string()).await;
    }

    let file = SelectedFile {
        path: path.clone(),
        name: name.clone(),
        size,
    };
    view.upload.begin(file.clone());
    ctx.emit(AppEvent::UploadStarted(file)).await;

    let task_ctx = ctx.clone();
    tokio::spawn(async move {
        let outcome = tokio::select! {
            _ = task_ctx.cancel.cancelled() => return,
            outcome = submit(&task_ctx, &path, name) => outcome,
        };
        task_ctx.report(TaskEvent::Submitted { path, outcome }).await;
    });

    Ok(())
}

async fn reject(ctx: &WorkflowContext, view: &mut ViewState, message: String) -> anyhow::Result<()> {
    tracing::info!("File rejected: {message}");
    view.upload.reject(message.clone());
    ctx.emit(AppEvent::UploadRejected(message)).await;
    Ok(())
}

async fn submit(ctx: &WorkflowContext, path: &Path, name: String) -> Result<AnalysisId, String> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        tracing::warn!("Failed to read {}: {e}", path.display());
        format!("Cannot read {}: {e}", path.display())
    })?;

    ctx.api
        .submit(UploadFile::new(name, bytes))
        .await
        .map_err(|e| {
            tracing::warn!("Upload failed: {e}");
            submit_error_message(&e)
        })
}

pub async fn handle_submitted(
    ctx: &WorkflowContext,
    view: &mut ViewState,
    path: PathBuf,
    outcome: Result<AnalysisId, String>,
) -> anyhow::Result<()> {
    let awaiting = view.upload.processing
        && view.upload.analysis_id.is_none()
        && view.upload.selected.as_ref().map(|f| &f.path) == Some(&path);
    if !awaiting {
        tracing::debug!("Dropping stale upload response for {}", path.display());
        return Ok(());
    }

    match outcome {
        Ok(id) => {
            tracing::info!("Analysis {id} started");
            view.upload.started(id.clone());
            view.poller = start_status_poller(ctx, id).await;

            if view.poller.is_none() {
                view.upload.fail(STATUS_UNAVAILABLE);
                ctx.emit(AppEvent::UploadFailed(STATUS_UNAVAILABLE.to_string())).await;
            }
        }
        Err(message) => {
            view.upload.fail(message.clone());
            ctx.emit(AppEvent::UploadFailed(message)).await;
        }
    }

    Ok(())
}
