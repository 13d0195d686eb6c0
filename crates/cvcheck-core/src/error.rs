/// Client-side rejection of a picked file
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please upload a PDF or DOCX file")]
    UnsupportedExtension { extension: String },

    #[error("File size exceeds {} MB limit", .limit / (1024 * 1024))]
    TooLarge { size: u64, limit: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid store contents: {0}")]
    Json(#[from] serde_json::Error),
}
