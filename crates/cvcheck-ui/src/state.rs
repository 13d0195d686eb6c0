use std::collections::VecDeque;

use console::Term;
use cvcheck_types::{Preferences, Route, UiEvent};

use crate::progress::AnalysisProgress;
use crate::theme::Palette;

/// How a UI session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiOutcome {
    Completed,
    Failed(String),
}

impl UiOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UiOutcome::Completed)
    }
}

/// What the UI loop does after handling an event
#[derive(Debug, Clone, PartialEq)]
pub enum Next {
    Wait,
    Send(UiEvent),
    Finish,
}

/// Startup options handed to the UI loop
#[derive(Debug, Clone)]
pub struct UiOptions {
    /// Intents queued from the command line, sent one at a time
    pub script: Vec<UiEvent>,
    pub prefs: Preferences,
    pub interactive: bool,
    pub color: bool,
}

/// UI-specific state (separate from the app's view state)
pub struct UiState {
    pub script: VecDeque<UiEvent>,
    pub prefs: Preferences,
    pub palette: Palette,
    pub interactive: bool,
    pub route: Route,
    pub has_results: bool,
    pub progress: Option<AnalysisProgress>,
    pub failure: Option<String>,
}

impl UiState {
    pub fn new(options: UiOptions) -> Self {
        Self {
            script: options.script.into(),
            prefs: options.prefs,
            palette: Palette::for_theme(options.prefs.theme),
            interactive: options.interactive,
            route: Route::Landing,
            has_results: false,
            progress: None,
            failure: None,
        }
    }

    pub fn set_prefs(&mut self, prefs: Preferences) {
        self.prefs = prefs;
        self.palette = Palette::for_theme(prefs.theme);
    }

    /// Next queued intent, if any
    pub fn advance(&mut self) -> Option<UiEvent> {
        self.script.pop_front()
    }

    pub fn record_failure(&mut self, message: &str) {
        self.failure = Some(message.to_string());
    }

    pub fn finish_progress(&mut self) {
        if let Some(progress) = self.progress.take() {
            progress.finish();
        }
    }

    /// Print a rendered view without tearing an active progress bar
    pub fn print(&self, term: &Term, text: &str) -> std::io::Result<()> {
        match &self.progress {
            Some(progress) => progress.suspend(|| term.write_line(text)),
            None => term.write_line(text),
        }
    }

    pub fn outcome(&self) -> UiOutcome {
        match &self.failure {
            Some(message) => UiOutcome::Failed(message.clone()),
            None => UiOutcome::Completed,
        }
    }
}
