use std::path::PathBuf;
use std::sync::Arc;

use cvcheck_client::AnalysisApi;
use cvcheck_types::{AnalysisId, AnalysisResult, AppEvent, StatusResponse};
use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Results of spawned work, reported back to the event loop
#[derive(Debug, Clone)]
pub enum TaskEvent {
    Submitted {
        path: PathBuf,
        outcome: Result<AnalysisId, String>,
    },
    PollProgress {
        id: AnalysisId,
        status: StatusResponse,
    },
    PollFinished {
        id: AnalysisId,
        outcome: PollOutcome,
    },
    ResultsFetched {
        id: AnalysisId,
        outcome: Result<AnalysisResult, String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Complete,
    Failed(String),
}

/// Shared dependencies of the event handlers and the tasks they spawn
#[derive(Clone)]
pub struct WorkflowContext {
    pub state: Arc<AppState>,
    pub api: Arc<dyn AnalysisApi>,
    pub app_to_ui_tx: AsyncSender<AppEvent>,
    pub task_tx: AsyncSender<TaskEvent>,
    pub cancel: CancellationToken,
}

impl WorkflowContext {
    pub fn new(
        state: Arc<AppState>,
        api: Arc<dyn AnalysisApi>,
        app_to_ui_tx: AsyncSender<AppEvent>,
        task_tx: AsyncSender<TaskEvent>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            state,
            api,
            app_to_ui_tx,
            task_tx,
            cancel,
        }
    }

    /// Send an event to the UI. A closed UI is only logged.
    pub async fn emit(&self, event: AppEvent) {
        if let Err(e) = self.app_to_ui_tx.send(event).await {
            tracing::debug!("UI channel closed: {e}");
        }
    }

    pub async fn report(&self, event: TaskEvent) {
        if let Err(e) = self.task_tx.send(event).await {
            tracing::debug!("Task channel closed: {e}");
        }
    }
}
