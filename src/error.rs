use thiserror::Error;

/// Failure of a catalog or backend call.
///
/// Call sites log these and carry on; nothing here is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StitchError {
    /// The request never completed (DNS, connection reset, CORS, ...).
    #[error("request failed: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("server returned status {status}")]
    Server { status: u16 },
    /// The body could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    Parse(String),
    #[error("no access token in session")]
    MissingSession,
    #[error("session storage: {0}")]
    Storage(String),
}

impl From<reqwest::Error> for StitchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for StitchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<rusqlite::Error> for StitchError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
