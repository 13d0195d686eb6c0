use std::time::Duration;

use cvcheck_types::{
    AnalysisId, AnalysisResult, AnalyzeResponse, ApiErrorBody, StatusResponse,
};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use crate::{AnalysisApi, ClientError, UploadFile};

#[derive(Clone)]
pub struct HttpAnalysisClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAnalysisClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn analysis_endpoint(&self, id: &AnalysisId, suffix: &str) -> String {
        self.endpoint(&format!(
            "/analysis/{}{}",
            urlencoding::encode(id.as_str()),
            suffix
        ))
    }

    /// Decode a JSON body, turning non-2xx responses into `ClientError::Api`
    async fn read_json<T>(response: reqwest::Response) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            // Proxies answer with HTML; keep the status and drop the body
            let error: ApiErrorBody = serde_json::from_slice(&body).unwrap_or_default();
            tracing::debug!(
                status = status.as_u16(),
                error = ?error.error,
                detail = ?error.message,
                "Analysis service returned an error"
            );
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: error.error,
            });
        }

        serde_json::from_slice(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl AnalysisApi for HttpAnalysisClient {
    async fn submit(&self, file: UploadFile) -> Result<AnalysisId, ClientError> {
        let mime = file.mime_type();
        let size = file.bytes.len();
        let part = Part::bytes(file.bytes)
            .file_name(file.name.clone())
            .mime_str(mime)?;
        let form = Form::new().part("file", part);

        tracing::info!("Uploading {} ({} bytes)", file.name, size);

        let response = self
            .client
            .post(self.endpoint("/analyze"))
            .multipart(form)
            .send()
            .await?;

        let body: AnalyzeResponse = Self::read_json(response).await?;
        tracing::info!("Analysis started: {}", body.analysis_id);

        Ok(body.analysis_id)
    }

    async fn status(&self, id: &AnalysisId) -> Result<StatusResponse, ClientError> {
        let response = self
            .client
            .get(self.analysis_endpoint(id, "/status"))
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn result(&self, id: &AnalysisId) -> Result<AnalysisResult, ClientError> {
        let response = self
            .client
            .get(self.analysis_endpoint(id, ""))
            .send()
            .await?;

        Self::read_json(response).await
    }
}
