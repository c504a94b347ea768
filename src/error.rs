use thiserror::Error;

/// Result type for soundbar operations
pub type Result<T> = std::result::Result<T, SoundbarError>;

/// Errors that can occur when talking to a soundbar
#[derive(Error, Debug)]
pub enum SoundbarError {
    /// HTTP request failed before a response could be read
    #[error("HTTP transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Device answered with a non-success HTTP status
    #[error("HTTP status {status}")]
    Http {
        /// Status code returned by the device
        status: u16,
    },

    /// Request timed out waiting for the device
    #[error("Request timeout")]
    Timeout,

    /// Response body is not well-formed XML
    #[error("XML parse error: {0}")]
    Parse(String),

    /// Well-formed XML without the `UIC`/`response` envelope
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A status field the caller needs was absent from the response
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A status field was present but could not be interpreted
    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue {
        /// Name of the offending field
        field: &'static str,
        /// Raw value as sent by the device
        value: String,
    },

    /// Requested volume fraction is outside 0.0..=1.0
    #[error("Invalid volume level: {0}")]
    InvalidVolume(f64),

    /// Operation needs a status snapshot but none has been fetched yet
    #[error("No status available, refresh first")]
    NoState,

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON deserialization error (host config entry data)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for SoundbarError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SoundbarError::Timeout
        } else if let Some(status) = err.status() {
            SoundbarError::Http {
                status: status.as_u16(),
            }
        } else {
            SoundbarError::Transport(err)
        }
    }
}

impl SoundbarError {
    /// Whether this error came from the HTTP layer (transport failure or bad status)
    pub fn is_transport(&self) -> bool {
        matches!(self, SoundbarError::Transport(_) | SoundbarError::Http { .. })
    }
}
