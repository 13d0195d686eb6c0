use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Opaque token the analysis service hands out for one submitted document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisId(String);

impl AnalysisId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Finalized feedback record returned by `GET /api/analysis/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weak_points: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzed_at: Option<String>,
}

/// Server-side lifecycle of an analysis
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnalysisStatus {
    #[default]
    Pending,
    Uploading,
    Extracting,
    Analyzing,
    Generating,
    Complete,
    Failed,
}

impl AnalysisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Pending => "pending",
            AnalysisStatus::Uploading => "uploading",
            AnalysisStatus::Extracting => "extracting",
            AnalysisStatus::Analyzing => "analyzing",
            AnalysisStatus::Generating => "generating",
            AnalysisStatus::Complete => "complete",
            AnalysisStatus::Failed => "failed",
        }
    }
}

impl From<String> for AnalysisStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "uploading" => AnalysisStatus::Uploading,
            "extracting" => AnalysisStatus::Extracting,
            "analyzing" => AnalysisStatus::Analyzing,
            "generating" => AnalysisStatus::Generating,
            "complete" => AnalysisStatus::Complete,
            "failed" => AnalysisStatus::Failed,
            // "pending", "processing" and anything the service adds later
            _ => AnalysisStatus::Pending,
        }
    }
}

impl From<AnalysisStatus> for String {
    fn from(value: AnalysisStatus) -> Self {
        value.as_str().to_string()
    }
}

fn default_step() -> u8 {
    1
}

/// Body of `GET /api/analysis/{id}/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub progress: f64,
    #[serde(default = "default_step")]
    pub step: u8,
    #[serde(default)]
    pub status: AnalysisStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of a successful `POST /api/analyze`
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis_id: AnalysisId,
}

/// Error body the service sends with non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

/// Client-side routes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Landing,
    Upload,
    Results { id: Option<AnalysisId> },
}

impl Route {
    pub fn results(id: AnalysisId) -> Self {
        Route::Results { id: Some(id) }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Landing => f.write_str("/"),
            Route::Upload => f.write_str("/upload"),
            Route::Results { id: Some(id) } => write!(f, "/results?id={id}"),
            Route::Results { id: None } => f.write_str("/results"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
    Zh,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::Zh,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Zh => "zh",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Español",
            Language::Fr => "Français",
            Language::De => "Deutsch",
            Language::Zh => "中文",
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            Language::En => "🇬🇧",
            Language::Es => "🇪🇸",
            Language::Fr => "🇫🇷",
            Language::De => "🇩🇪",
            Language::Zh => "🇨🇳",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        Language::ALL.into_iter().find(|lang| lang.code() == code)
    }
}

/// The persisted user preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub language: Language,
}

/// A file the user picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

/// Progress snapshot for the processing view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressUpdate {
    pub progress: f64,
    pub step: u8,
}

/// Events sent from the app to the UI
#[derive(Debug, Clone)]
pub enum AppEvent {
    Navigated(Route),
    PreferencesChanged(Preferences),
    UploadRejected(String),
    UploadStarted(SelectedFile),
    AnalysisProgress(ProgressUpdate),
    UploadFailed(String),
    ResultsLoading(AnalysisId),
    ResultsLoaded(AnalysisResult),
    ResultsFailed(String),
    FeedbackText(String),
    ReportSaved(PathBuf),
    Toast(String),
    ExportFailed(String),
}

/// User intents sent from the UI to the app
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Navigate(String),
    SelectFile(PathBuf),
    ResetUpload,
    RetryResults,
    AnalyzeAnother,
    CopyFeedback,
    PrintFeedback,
    DownloadReport { dir: Option<PathBuf> },
    ToggleTheme,
    SetTheme(Theme),
    SetLanguage(Language),
    ShowPreferences,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_is_pending() {
        let status: StatusResponse =
            serde_json::from_str(r#"{"progress": 25, "step": 1, "status": "processing"}"#)
                .unwrap();
        assert_eq!(status.status, AnalysisStatus::Pending);
        assert_eq!(status.progress, 25.0);
    }

    #[test]
    fn status_defaults_when_fields_missing() {
        let status: StatusResponse = serde_json::from_str(r#"{"progress": 100}"#).unwrap();
        assert_eq!(status.step, 1);
        assert_eq!(status.status, AnalysisStatus::Pending);
        assert!(status.error.is_none());
    }

    #[test]
    fn result_decodes_with_service_metadata() {
        let json = r#"{
            "overall_score": 7.5,
            "strengths": ["Clear layout"],
            "weak_points": [],
            "missing_keywords": ["Docker"],
            "suggestions": ["Quantify impact"],
            "analysis_id": "abc123",
            "filename": "cv.pdf",
            "analyzed_at": "2026-01-01T10:00:00Z"
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.overall_score, 7.5);
        assert_eq!(result.filename.as_deref(), Some("cv.pdf"));
        assert_eq!(result.missing_keywords, vec!["Docker".to_string()]);
    }

    #[test]
    fn result_lists_default_to_empty() {
        let result: AnalysisResult = serde_json::from_str(r#"{"overall_score": 4}"#).unwrap();
        assert!(result.strengths.is_empty());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn route_paths() {
        assert_eq!(Route::Landing.to_string(), "/");
        assert_eq!(Route::Upload.to_string(), "/upload");
        assert_eq!(
            Route::results(AnalysisId::new("abc123")).to_string(),
            "/results?id=abc123"
        );
    }

    #[test]
    fn language_codes() {
        assert_eq!(Language::from_code("FR"), Some(Language::Fr));
        assert_eq!(Language::from_code("pt"), None);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
