use std::sync::Arc;

use cvcheck_client::AnalysisApi;
use cvcheck_types::{AppEvent, UiEvent};
use cvcheck_ui::{UiOptions, UiOutcome};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::context::{TaskEvent, WorkflowContext};
use crate::events::event_loop;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Both ends of every channel between the UI, the event loop and spawned work
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<UiEvent>, AsyncReceiver<UiEvent>),
    pub tasks: (AsyncSender<TaskEvent>, AsyncReceiver<TaskEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256), // progress bursts
            ui_to_app: kanal::bounded_async(64),  // user intents
            tasks: kanal::bounded_async(64),      // spawned work reporting back
        }
    }
}

/// Owns the channels and the background event loop of one session
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    api: Arc<dyn AnalysisApi>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, api: Arc<dyn AnalysisApi>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            api,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        let ctx = WorkflowContext::new(
            self.state.clone(),
            self.api.clone(),
            self.channels.app_to_ui.0.clone(),
            self.channels.tasks.0.clone(),
            self.cancel_token.clone(),
        );

        // Sole owner of view state
        tasks.spawn(event_loop(
            ctx,
            self.channels.ui_to_app.1.clone(),
            self.channels.tasks.1.clone(),
        ));

        tasks
    }

    /// Run the UI in the foreground until the session ends, then stop the
    /// background tasks
    pub async fn run(self, options: UiOptions) -> anyhow::Result<UiOutcome> {
        let mut tasks = self.spawn_tasks();

        let ui = ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            options,
        );
        tokio::pin!(ui);

        let outcome = tokio::select! {
            biased;
            outcome = &mut ui => outcome,
            Some(result) = tasks.join_next() => {
                match result {
                    Ok(Ok(())) => tracing::warn!("Event loop exited before the UI"),
                    Ok(Err(e)) => tracing::error!("Event loop failed: {e:#}"),
                    Err(e) => tracing::error!("Event loop panicked: {e}"),
                }
                Err(anyhow::anyhow!("event loop stopped unexpectedly"))
            }
        };

        self.shutdown();
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::error!("Task failed: {e:#}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }

        outcome
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
        // Unblock any sender still waiting on the UI
        let _ = self.channels.app_to_ui.1.close();
    }
}
