//! Event-loop tests against a scripted analysis service

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cvcheck_client::{AnalysisApi, ClientError, UploadFile};
use cvcheck_config::Config;
use cvcheck_core::preferences::{MemoryStore, PreferenceState};
use cvcheck_types::{
    AnalysisId, AnalysisResult, AnalysisStatus, AppEvent, StatusResponse, Theme, UiEvent,
};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::context::{TaskEvent, WorkflowContext};
use crate::events::event_loop;
use crate::state::AppState;


/// Analysis service double. Queued responses are served in order; an empty
/// status queue keeps answering "analyzing".
#[derive(Default)]
pub struct FakeApi {
    submits: Mutex<VecDeque<Result<AnalysisId, ClientError>>>,
    statuses: Mutex<VecDeque<Result<StatusResponse, ClientError>>>,
    results: Mutex<VecDeque<Result<AnalysisResult, ClientError>>>,
    status_delay: Duration,
    pub uploaded: Mutex<Vec<String>>,
    pub polled: Mutex<Vec<AnalysisId>>,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_submit(self, response: Result<AnalysisId, ClientError>) -> Self {
        self.submits.lock().unwrap().push_back(response);
        self
    }

    pub fn with_status(self, response: Result<StatusResponse, ClientError>) -> Self {
        self.statuses.lock().unwrap().push_back(response);
        self
    }

    pub fn with_result(self, response: Result<AnalysisResult, ClientError>) -> Self {
        self.results.lock().unwrap().push_back(response);
        self
    }

    pub fn with_status_delay(mut self, delay: Duration) -> Self {
        self.status_delay = delay;
        self
    }

    pub fn status_calls(&self) -> usize {
        self.polled.lock().unwrap().len()
    }
}

#[async_trait]
impl AnalysisApi for FakeApi {
    async fn submit(&self, file: UploadFile) -> Result<AnalysisId, ClientError> {
        self.uploaded.lock().unwrap().push(file.name);
        self.submits
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(AnalysisId::new("abc123")))
    }

    async fn status(&self, id: &AnalysisId) -> Result<StatusResponse, ClientError> {
        self.polled.lock().unwrap().push(id.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.status_delay.is_zero() {
            tokio::time::sleep(self.status_delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(status(50.0, 3, AnalysisStatus::Analyzing)))
    }

    async fn result(&self, _id: &AnalysisId) -> Result<AnalysisResult, ClientError> {
        self.results.lock().unwrap().pop_front().unwrap_or(Err(ClientError::Api {
            status: 404,
            message: Some("Analysis not found".into()),
        }))
    }
}

pub fn status(progress: f64, step: u8, status: AnalysisStatus) -> StatusResponse {
    StatusResponse {
        progress,
        step,
        status,
        error: None,
        message: None,
    }
}

pub fn sample_result() -> AnalysisResult {
    AnalysisResult {
        overall_score: 7.5,
        strengths: vec!["Clear structure".into()],
        weak_points: vec!["No metrics".into()],
        missing_keywords: vec!["Docker".into(), "AWS".into()],
        suggestions: vec!["Quantify results".into()],
        analysis_id: Some("abc123".into()),
        filename: Some("cv.pdf".into()),
        analyzed_at: None,
    }
}

pub fn test_config(interval_ms: u64) -> Config {
    let mut config = Config::default();
    config.polling.interval_ms = interval_ms;
    config
}

pub fn test_state(config: Config) -> Arc<AppState> {
    let preferences = PreferenceState::load(Box::new(MemoryStore::new()), None, Theme::Light);
    Arc::new(AppState::new(config, preferences))
}

/// Context plus the receiving ends of its channels
pub struct TestContext {
    pub ctx: WorkflowContext,
    pub api: Arc<FakeApi>,
    pub app_rx: AsyncReceiver<AppEvent>,
    pub task_rx: AsyncReceiver<TaskEvent>,
}

pub fn test_context(api: FakeApi, config: Config) -> TestContext {
    let api = Arc::new(api);
    let (app_tx, app_rx) = kanal::bounded_async(256);
    let (task_tx, task_rx) = kanal::bounded_async(256);

    let ctx = WorkflowContext::new(
        test_state(config),
        api.clone(),
        app_tx,
        task_tx,
        CancellationToken::new(),
    );

    TestContext {
        ctx,
        api,
        app_rx,
        task_rx,
    }
}

/// A running event loop
pub struct Harness {
    pub ctx: WorkflowContext,
    pub api: Arc<FakeApi>,
    pub ui_tx: AsyncSender<UiEvent>,
    pub app_rx: AsyncReceiver<AppEvent>,
    pub handle: JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    pub fn start(api: FakeApi, config: Config) -> Self {
        let TestContext {
            ctx,
            api,
            app_rx,
            task_rx,
        } = test_context(api, config);
        let (ui_tx, ui_rx) = kanal::bounded_async(64);

        let handle = tokio::spawn(event_loop(ctx.clone(), ui_rx, task_rx));

        Self {
            ctx,
            api,
            ui_tx,
            app_rx,
            handle,
        }
    }

    pub async fn send(&self, event: UiEvent) {
        self.ui_tx.send(event).await.unwrap();
    }

    pub async fn next(&self) -> AppEvent {
        tokio::time::timeout(Duration::from_secs(5), self.app_rx.recv())
            .await
            .expect("timed out waiting for an app event")
            .expect("app channel closed")
    }

    /// Next event that is not a progress update
    pub async fn next_settled(&self) -> AppEvent {
        loop {
            match self.next().await {
                AppEvent::AnalysisProgress(_) => continue,
                event => return event,
            }
        }
    }

    pub fn polling(&self) -> bool {
        self.ctx.state.polling.load(Ordering::SeqCst)
    }

    pub async fn quit(self) {
        self.send(UiEvent::Quit).await;
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("event loop did not stop")
            .unwrap()
            .unwrap();
    }
}
