use cvcheck_client::ClientError;
use cvcheck_core::results::{RESULTS_LOAD_FAILED, RESULTS_UNREACHABLE};
use cvcheck_types::{AnalysisId, AnalysisResult, AppEvent, Route};

use crate::context::{TaskEvent, WorkflowContext};
use crate::events::ViewState;

pub fn results_error_message(error: &ClientError) -> String {
    if error.is_transport() {
        return RESULTS_UNREACHABLE.to_string();
    }
    error.server_message().unwrap_or(RESULTS_LOAD_FAILED).to_string()
}

pub fn spawn_results_fetch(ctx: &WorkflowContext, id: AnalysisId) {
    let task_ctx = ctx.clone();

    tokio::spawn(async move {
        let outcome = tokio::select! {
            _ = task_ctx.cancel.cancelled() => return,
            result = task_ctx.api.result(&id) => result.map_err(|e| {
                tracing::warn!("Fetching results for {id} failed: {e}");
                results_error_message(&e)
            }),
        };

        task_ctx.report(TaskEvent::ResultsFetched { id, outcome }).await;
    });
}

pub async fn handle_retry(ctx: &WorkflowContext, view: &mut ViewState) -> anyhow::Result<()> {
    if !matches!(view.route, Route::Results { .. }) {
        tracing::warn!("Retry requested outside the results view");
        return Ok(());
    }

    if let Some(id) = view.results.retry() {
        ctx.emit(AppEvent::ResultsLoading(id.clone())).await;
        spawn_results_fetch(ctx, id);
    }

    Ok(())
}

pub async fn handle_results_fetched(
    ctx: &WorkflowContext,
    view: &mut ViewState,
    id: AnalysisId,
    outcome: Result<AnalysisResult, String>,
) {
    if !view.results.is_current(&id) || !view.results.loading {
        tracing::debug!("Dropping stale results for {id}");
        return;
    }

    match outcome {
        Ok(result) => {
            view.results.loaded(result.clone());
            ctx.emit(AppEvent::ResultsLoaded(result)).await;
        }
        Err(message) => {
            view.results.failed(message.clone());
            ctx.emit(AppEvent::ResultsFailed(message)).await;
        }
    }
}
