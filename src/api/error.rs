use crate::navigation::Cancelled;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// 401 from the backend; the credential has already been evicted
    #[error("Unauthorized: {url}")]
    Unauthorized { url: String },

    #[error("API returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response body from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Invalid endpoint '{path}': {message}")]
    InvalidUrl { path: String, message: String },

    #[error("Request abandoned: {0}")]
    Cancelled(#[from] Cancelled),

    #[error("Credential storage failed: {0}")]
    Storage(#[from] crate::utils::token_store::StoreError),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled(_))
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
