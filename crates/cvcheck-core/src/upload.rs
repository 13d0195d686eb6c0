use cvcheck_config::upload::UploadConfig;
use cvcheck_types::{AnalysisId, AnalysisStatus, ProgressUpdate, SelectedFile, StatusResponse};

use crate::error::ValidationError;

pub const UPLOAD_FAILED: &str = "Upload failed";
pub const UPLOAD_NETWORK_FAILED: &str =
    "File upload failed. Please check your connection and try again.";
pub const STATUS_UNAVAILABLE: &str = "Unable to get analysis status. Please try again.";
pub const ANALYSIS_FAILED: &str = "Analysis failed. Please try again or contact support.";
pub const ANALYSIS_TIMED_OUT: &str =
    "Analysis is taking longer than expected. Please try again later.";

pub const STAGE_LABELS: [&str; 4] = [
    "File uploaded",
    "Text extracted",
    "Running AI analysis",
    "Generating report",
];

/// Check a picked file against the accepted formats and size limit.
/// The extension is checked before the size.
pub fn validate_file(name: &str, size: u64, rules: &UploadConfig) -> Result<(), ValidationError> {
    // Text after the last dot; a name without one is its own extension
    let extension = name.rsplit('.').next().unwrap_or(name).to_lowercase();

    if !rules
        .allowed_extensions
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(&extension))
    {
        return Err(ValidationError::UnsupportedExtension { extension });
    }

    if size > rules.max_file_size {
        return Err(ValidationError::TooLarge {
            size,
            limit: rules.max_file_size,
        });
    }

    Ok(())
}

pub fn format_file_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    Complete,
    Current,
    Pending,
}

impl StageState {
    pub fn icon(&self) -> &'static str {
        match self {
            StageState::Complete => "✓",
            StageState::Current => "→",
            StageState::Pending => "⋯",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub label: &'static str,
    pub state: StageState,
}

/// Map the service's step ordinal onto the four displayed stages
pub fn stage_display(step: u8) -> [Stage; 4] {
    std::array::from_fn(|i| {
        let ordinal = i as u8 + 1;
        let state = if step > ordinal {
            StageState::Complete
        } else if step == ordinal {
            StageState::Current
        } else {
            StageState::Pending
        };

        Stage {
            label: STAGE_LABELS[i],
            state,
        }
    })
}

/// What one status response means for the polling loop
#[derive(Debug, Clone, PartialEq)]
pub enum PollVerdict {
    Continue,
    Complete,
    Failed(String),
}

pub fn classify_status(status: &StatusResponse) -> PollVerdict {
    // A failed analysis has nothing to show, whatever progress says
    if status.status == AnalysisStatus::Failed {
        let message = status
            .error
            .clone()
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| ANALYSIS_FAILED.to_string());
        return PollVerdict::Failed(message);
    }

    if status.progress >= 100.0 || status.status == AnalysisStatus::Complete {
        return PollVerdict::Complete;
    }

    PollVerdict::Continue
}

/// State of the upload view
#[derive(Debug, Clone, PartialEq)]
pub struct UploadState {
    pub processing: bool,
    pub error: Option<String>,
    pub selected: Option<SelectedFile>,
    pub progress: f64,
    pub step: u8,
    pub analysis_id: Option<AnalysisId>,
}

impl Default for UploadState {
    fn default() -> Self {
        Self {
            processing: false,
            error: None,
            selected: None,
            progress: 0.0,
            step: 1,
            analysis_id: None,
        }
    }
}

impl UploadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validation failed; stay on the picker
    pub fn reject(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Start a fresh upload; nothing of an earlier attempt survives
    pub fn begin(&mut self, file: SelectedFile) {
        *self = Self {
            selected: Some(file),
            processing: true,
            ..Self::default()
        };
    }

    pub fn started(&mut self, id: AnalysisId) {
        self.analysis_id = Some(id);
    }

    pub fn apply_status(&mut self, status: &StatusResponse) -> ProgressUpdate {
        self.progress = status.progress;
        self.step = status.step;
        ProgressUpdate {
            progress: self.progress,
            step: self.step,
        }
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.processing = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when `id` is the analysis this view is currently tracking
    pub fn is_tracking(&self, id: &AnalysisId) -> bool {
        self.processing && self.analysis_id.as_ref() == Some(id)
    }
}
