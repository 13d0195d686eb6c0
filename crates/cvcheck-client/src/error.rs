#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Api { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// The `error` field of a non-2xx response body, if the service sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// True when the service never produced a response
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }
}
