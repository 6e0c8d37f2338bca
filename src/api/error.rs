use thiserror::Error;

/// Errors surfaced by the backend API layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connection refused, timeout, bad body.
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status. `message` is the
    /// server-provided message when the body carried one, else a generic
    /// fallback.
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport(_) => None,
            ApiError::Api { status, .. } => Some(*status),
        }
    }
}
