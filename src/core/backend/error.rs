use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Cannot connect to backend: {0}")]
    Unreachable(String),
    #[error("Request timeout: Server took too long")]
    Timeout,
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl BackendError {
    pub fn kind(&self) -> &'static str {
        match self {
            BackendError::Unreachable(_) => "NetworkUnreachable",
            BackendError::Timeout => "RequestTimeout",
            BackendError::Server { .. } => "ServerError",
            BackendError::InvalidResponse(_) => "InvalidResponse",
            BackendError::Client(_) => "ClientError",
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Timeout
        } else if e.is_decode() {
            BackendError::InvalidResponse(e.to_string())
        } else if e.is_builder() {
            BackendError::Client(e.to_string())
        } else {
            BackendError::Unreachable(e.to_string())
        }
    }
}
