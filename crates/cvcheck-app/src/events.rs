use std::sync::atomic::Ordering;

use cvcheck_core::results::ResultsState;
use cvcheck_core::upload::UploadState;
use cvcheck_types::{Route, UiEvent};
use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;

use crate::context::{TaskEvent, WorkflowContext};
use crate::state::AppState;

pub mod export;
pub mod load_results;
pub mod navigate;
pub mod poll_status;
pub mod preferences;
pub mod select_file;

use export::{handle_copy, handle_download, handle_print};
use load_results::{handle_results_fetched, handle_retry};
use navigate::{handle_navigation, handle_reset};
use poll_status::{handle_poll_finished, handle_poll_progress};
use preferences::handle_preferences;
use select_file::{handle_file_selection, handle_submitted};

/// View state, owned and written only by the event loop
#[derive(Debug, Default)]
pub struct ViewState {
    pub route: Route,
    pub upload: UploadState,
    pub results: ResultsState,
    pub poller: Option<CancellationToken>,
}

impl ViewState {
    /// Cancel the running poller, if any, and release the polling slot
    pub fn stop_poller(&mut self, state: &AppState) {
        if let Some(token) = self.poller.take() {
            token.cancel();
            state.polling.store(false, Ordering::SeqCst);
            tracing::debug!("Status poller cancelled");
        }
    }
}

/// App's main loop
pub async fn event_loop(
    ctx: WorkflowContext,
    ui_to_app_rx: AsyncReceiver<UiEvent>,
    task_rx: AsyncReceiver<TaskEvent>,
) -> anyhow::Result<()> {
    let mut view = ViewState::default();

    tracing::debug!("[EVENT_LOOP] Waiting for events");
    loop {
        tokio::select! {
            _ = ctx.cancel.cancelled() => {
                tracing::debug!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = ui_to_app_rx.recv() => {
                let Ok(event) = event else {
                    tracing::debug!("[EVENT_LOOP] UI channel closed");
                    break;
                };
                if event == UiEvent::Quit {
                    break;
                }
                handle_ui_event(&ctx, &mut view, event).await?;
            }
            event = task_rx.recv() => {
                let Ok(event) = event else { break };
                handle_task_event(&ctx, &mut view, event).await?;
            }
        }
    }

    view.stop_poller(&ctx.state);
    Ok(())
}

async fn handle_ui_event(
    ctx: &WorkflowContext,
    view: &mut ViewState,
    event: UiEvent,
) -> anyhow::Result<()> {
    tracing::debug!("[EVENT_LOOP] UI event: {:?}", event);

    match event {
        UiEvent::Navigate(path) => handle_navigation(ctx, view, &path).await,
        UiEvent::SelectFile(path) => handle_file_selection(ctx, view, path).await,
        UiEvent::ResetUpload => handle_reset(ctx, view).await,
        UiEvent::RetryResults => handle_retry(ctx, view).await,
        UiEvent::AnalyzeAnother => handle_navigation(ctx, view, "/upload").await,
        UiEvent::CopyFeedback => handle_copy(ctx, view).await,
        UiEvent::PrintFeedback => handle_print(ctx, view).await,
        UiEvent::DownloadReport { dir } => handle_download(ctx, view, dir).await,
        UiEvent::ToggleTheme
        | UiEvent::SetTheme(_)
        | UiEvent::SetLanguage(_)
        | UiEvent::ShowPreferences => handle_preferences(ctx, event).await,
        // Handled by the loop itself
        UiEvent::Quit => Ok(()),
    }
}

async fn handle_task_event(
    ctx: &WorkflowContext,
    view: &mut ViewState,
    event: TaskEvent,
) -> anyhow::Result<()> {
    match event {
        TaskEvent::Submitted { path, outcome } => handle_submitted(ctx, view, path, outcome).await,
        TaskEvent::PollProgress { id, status } => {
            handle_poll_progress(ctx, view, id, status).await;
            Ok(())
        }
        TaskEvent::PollFinished { id, outcome } => handle_poll_finished(ctx, view, id, outcome).await,
        TaskEvent::ResultsFetched { id, outcome } => {
            handle_results_fetched(ctx, view, id, outcome).await;
            Ok(())
        }
    }
}
