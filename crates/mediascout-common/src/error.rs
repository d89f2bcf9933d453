//! Common error types used throughout mediascout.
//!
//! Provider adapters and the HTTP layer report failures through this type.
//! None of these errors ever reach the host form: the adapter boundary turns
//! every variant into an empty result list.

/// Common error type for mediascout.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A provider that needs credentials has none configured.
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// The request never produced a response (connection, DNS, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The upstream answered with a non-success status code.
    #[error("Upstream returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The response body could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a new NotConfigured error.
    pub fn not_configured<S: Into<String>>(provider: S) -> Self {
        Self::NotConfigured(provider.into())
    }

    /// Create a new Transport error.
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new Status error.
    pub fn status<S: Into<String>>(status: u16, url: S) -> Self {
        Self::Status {
            status,
            url: url.into(),
        }
    }

    /// Create a new Decode error.
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// True for failures caused by missing configuration rather than the
    /// upstream misbehaving.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::NotConfigured(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
