use thiserror::Error;

/// Everything the client can fail with is recoverable locally; none of
/// these abort the process.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No credential is present or the server refused ours. The action is
    /// refused client-side before any network call where possible.
    #[error("not signed in")]
    Unauthenticated,

    /// Network failure, timeout, or a non-success status. Optimistic state
    /// is rolled back by the caller.
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered but the payload did not match the expected
    /// shape. Same rollback contract as `Transport`, reported distinctly.
    #[error("unexpected response from server: {0}")]
    Decode(String),

    /// Rejected before dispatch (empty comment, missing attachment, ...).
    #[error("{0}")]
    Validation(String),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
