use cvcheck_types::{AnalysisId, AnalysisResult};

pub const RESULTS_LOAD_FAILED: &str = "Failed to load results";
pub const RESULTS_UNREACHABLE: &str = "Unable to load analysis results. Please try again.";
pub const FEEDBACK_COPIED: &str = "Feedback copied to clipboard!";

/// State of the results view. Recreated on every visit, never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsState {
    pub id: Option<AnalysisId>,
    pub loading: bool,
    pub error: Option<String>,
    pub data: Option<AnalysisResult>,
}

impl ResultsState {
    pub fn mount(id: AnalysisId) -> Self {
        Self {
            id: Some(id),
            loading: true,
            error: None,
            data: None,
        }
    }

    pub fn retry(&mut self) -> Option<AnalysisId> {
        let id = self.id.clone()?;
        self.loading = true;
        self.error = None;
        Some(id)
    }

    pub fn loaded(&mut self, data: AnalysisResult) {
        self.loading = false;
        self.error = None;
        self.data = Some(data);
    }

    pub fn failed(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn is_current(&self, id: &AnalysisId) -> bool {
        self.id.as_ref() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_starts_loading() {
        let state = ResultsState::mount(AnalysisId::new("abc123"));
        assert!(state.loading);
        assert!(state.is_current(&AnalysisId::new("abc123")));
        assert!(!state.is_current(&AnalysisId::new("other")));
    }

    #[test]
    fn retry_after_failure() {
        let mut state = ResultsState::mount(AnalysisId::new("abc123"));
        state.failed(RESULTS_LOAD_FAILED);
        assert!(!state.loading);

        assert_eq!(state.retry(), Some(AnalysisId::new("abc123")));
        assert!(state.loading);
        assert!(state.error.is_none());

        assert_eq!(ResultsState::default().retry(), None);
    }
}
