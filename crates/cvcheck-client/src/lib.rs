mod client;
mod error;

pub use client::HttpAnalysisClient;
pub use error::ClientError;

use cvcheck_types::{AnalysisId, AnalysisResult, StatusResponse};

/// A document ready to be sent to the analysis service
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        let extension = self
            .name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => "application/pdf",
            "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            _ => "application/octet-stream",
        }
    }
}

/// The remote analysis service
#[async_trait::async_trait]
pub trait AnalysisApi: Send + Sync {
    /// `POST /api/analyze`
    async fn submit(&self, file: UploadFile) -> Result<AnalysisId, ClientError>;

    /// `GET /api/analysis/{id}/status`
    async fn status(&self, id: &AnalysisId) -> Result<StatusResponse, ClientError>;

    /// `GET /api/analysis/{id}`
    async fn result(&self, id: &AnalysisId) -> Result<AnalysisResult, ClientError>;
}
