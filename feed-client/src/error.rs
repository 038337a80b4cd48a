use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by `feed-client`.
pub enum FeedClientError {
    /// Transport failure (`reqwest`): connection, timeout, body decoding.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The post does not exist.
    #[error("not found")]
    NotFound,

    /// The server rejected the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result of `feed-client` operations.
pub type FeedClientResult<T> = Result<T, FeedClientError>;

impl FeedClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            _ => {
                let message = message.unwrap_or_else(|| format!("http status {status}"));
                Self::InvalidRequest(message)
            }
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}
