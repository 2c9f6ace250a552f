//! Error types for gf-core
//!
//! Local precondition failures and transport failures are raised as `Error`.
//! Errors reported by the GoFile service itself are not errors here: they
//! arrive as an [`Envelope`](crate::Envelope) whose `status` is not `"ok"`.

use thiserror::Error;

/// Result type alias for gf-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for gf-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument is missing or empty, or an argument is not allowed
    /// in the current session mode
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The session is not in a state that allows the operation
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// Connection-level failure while talking to the service
    #[error("Network error: {0}")]
    Network(String),

    /// The request could not be issued (unsupported scheme, bad request URL)
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response the client needs to read lacks the expected field
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error, including response bodies that are not JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) => 2,              // UsageError
            Error::Config(_) | Error::TomlParse(_) => 2, // UsageError
            Error::Network(_) | Error::Transport(_) => 3, // NetworkError
            Error::PreconditionFailed(_) => 6,           // PreconditionFailed
            _ => 1,                                      // GeneralError
        }
    }
}
