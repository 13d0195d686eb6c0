use std::sync::atomic::Ordering;
use std::time::Duration;

use cvcheck_core::upload::{ANALYSIS_TIMED_OUT, PollVerdict, STATUS_UNAVAILABLE, classify_status};
use cvcheck_types::{AnalysisId, AppEvent, Route, StatusResponse};
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::context::{PollOutcome, TaskEvent, WorkflowContext};
use crate::events::ViewState;

use super::navigate::enter_route;

/// Start polling the status of `id`. Returns the poller's cancellation
/// token, or None when another poller is already running.
pub async fn start_status_poller(ctx: &WorkflowContext, id: AnalysisId) -> Option<CancellationToken> {
    // Don't start again if already running
    if ctx.state.polling.swap(true, Ordering::SeqCst) {
        tracing::warn!("Status poller already running, not polling {id}");
        return None;
    }

    let (period, max_attempts) = {
        let config = ctx.state.config.read().await;
        (config.poll_interval(), config.polling.max_attempts)
    };

    let token = ctx.cancel.child_token();
    let task_ctx = ctx.clone();
    let task_token = token.clone();

    tokio::spawn(async move {
        let outcome = poll_until_done(&task_ctx, &id, period, max_attempts, &task_token).await;

        // Whoever cancels a poller also releases the slot
        if !task_token.is_cancelled() {
            task_ctx.state.polling.store(false, Ordering::SeqCst);
        }

        if let Some(outcome) = outcome {
            task_ctx.report(TaskEvent::PollFinished { id, outcome }).await;
        }
    });

    Some(token)
}

/// One request per tick, each awaited before the next tick is taken.
/// Returns None when cancelled.
async fn poll_until_done(
    ctx: &WorkflowContext,
    id: &AnalysisId,
    period: Duration,
    max_attempts: Option<u32>,
    token: &CancellationToken,
) -> Option<PollOutcome> {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    interval.tick().await;

    let mut attempts: u32 = 0;
    loop {
        tokio::select! {
            _ = token.cancelled() => return None,
            _ = interval.tick() => {}
        }

        attempts += 1;
        let response = tokio::select! {
            _ = token.cancelled() => return None,
            response = ctx.api.status(id) => response,
        };

        let status = match response {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!("Status request for {id} failed: {e}");
                return Some(PollOutcome::Failed(STATUS_UNAVAILABLE.to_string()));
            }
        };

        tracing::debug!(
            progress = status.progress,
            step = status.step,
            status = status.status.as_str(),
            "Status of {id}"
        );

        match classify_status(&status) {
            PollVerdict::Failed(message) => return Some(PollOutcome::Failed(message)),
            PollVerdict::Complete => {
                report_progress(ctx, id, status).await;
                return Some(PollOutcome::Complete);
            }
            PollVerdict::Continue => {
                report_progress(ctx, id, status).await;

                if let Some(max) = max_attempts
                    && attempts >= max
                {
                    tracing::warn!("Giving up on {id} after {attempts} status requests");
                    return Some(PollOutcome::Failed(ANALYSIS_TIMED_OUT.to_string()));
                }
            }
        }
    }
}

async fn report_progress(ctx: &WorkflowContext, id: &AnalysisId, status: StatusResponse) {
    ctx.report(TaskEvent::PollProgress {
        id: id.clone(),
        status,
    })
    .await;
}

pub async fn handle_poll_progress(
    ctx: &WorkflowContext,
    view: &mut ViewState,
    id: AnalysisId,
    status: StatusResponse,
) {
    if !view.upload.is_tracking(&id) {
        return;
    }

    let update = view.upload.apply_status(&status);
    ctx.emit(AppEvent::AnalysisProgress(update)).await;
}

pub async fn handle_poll_finished(
    ctx: &WorkflowContext,
    view: &mut ViewState,
    id: AnalysisId,
    outcome: PollOutcome,
) -> anyhow::Result<()> {
    if !view.upload.is_tracking(&id) {
        tracing::debug!("Dropping stale poll result for {id}");
        return Ok(());
    }

    // The task already released the polling slot
    view.poller = None;

    match outcome {
        PollOutcome::Complete => {
            tracing::info!("Analysis {id} complete");
            enter_route(ctx, view, Route::results(id)).await;
        }
        PollOutcome::Failed(message) => {
            tracing::warn!("Analysis {id} failed: {message}");
            view.upload.fail(message.clone());
            ctx.emit(AppEvent::UploadFailed(message)).await;
        }
    }

    Ok(())
}
