use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed {endpoint} response: {reason}")]
    MalformedResponse {
        endpoint: &'static str,
        reason: String,
    },
    #[error("failed to create {collection}/{id}: backend returned {status}")]
    CreateFailed {
        collection: String,
        id: String,
        status: reqwest::StatusCode,
    },
}

impl ApiError {
    pub(crate) fn malformed(endpoint: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            endpoint,
            reason: reason.into(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
