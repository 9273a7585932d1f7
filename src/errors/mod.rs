//! Error handling module for the video request client.
//!
//! Every failure talking to the video request API collapses into [`NetworkError`].
//! Callers in the view controller log it and stop; nothing is retried.

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const HTTP_STATUS: &str = "HTTP_STATUS";
    pub const TRANSPORT: &str = "TRANSPORT";
    pub const DECODE: &str = "DECODE";
}

/// Failure of a request against the video request API.
#[derive(Debug)]
pub enum NetworkError {
    /// The server answered with a non-success status
    Status { status: u16, body: String },
    /// Connection, timeout or protocol failure
    Transport(String),
    /// The response body could not be parsed
    Decode(String),
}

impl NetworkError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::Status { .. } => codes::HTTP_STATUS,
            NetworkError::Transport(_) => codes::TRANSPORT,
            NetworkError::Decode(_) => codes::DECODE,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            NetworkError::Status { status, body } if body.is_empty() => {
                format!("server responded with status {}", status)
            }
            NetworkError::Status { status, body } => {
                format!("server responded with status {}: {}", status, body)
            }
            NetworkError::Transport(msg) => msg.clone(),
            NetworkError::Decode(msg) => msg.clone(),
        }
    }

    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for NetworkError {}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            tracing::debug!("Decode error: {:?}", err);
            return NetworkError::Decode(format!("Invalid response body: {}", err));
        }
        if let Some(status) = err.status() {
            return NetworkError::Status {
                status: status.as_u16(),
                body: String::new(),
            };
        }
        tracing::debug!("Transport error: {:?}", err);
        NetworkError::Transport(format!("Request failed: {}", err))
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        NetworkError::Decode(format!("JSON error: {}", err))
    }
}
