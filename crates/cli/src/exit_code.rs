//! Exit code definitions for the gf CLI
//!
//! Scripts rely on these values. Changing one is a breaking change.

/// Exit codes for the gf CLI application.
///
/// A reply from the service with a non-`ok` status still prints the reply,
/// and the exit code tells scripts what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully
    Success = 0,

    /// General/unspecified error, including unrecognized service statuses
    GeneralError = 1,

    /// User input error: invalid arguments, unreadable file, bad config
    UsageError = 2,

    /// Network error: connection failure, unreadable response
    NetworkError = 3,

    /// The service rejected the token
    AuthError = 4,

    /// Content or folder does not exist
    NotFound = 5,

    /// The session cannot perform the operation yet (no token, unknown root)
    PreconditionFailed = 6,

    /// Endpoint restricted to premium accounts
    PremiumRequired = 7,

    /// Operation was interrupted (e.g., Ctrl+C)
    Interrupted = 130,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::GeneralError),
            2 => Some(Self::UsageError),
            3 => Some(Self::NetworkError),
            4 => Some(Self::AuthError),
            5 => Some(Self::NotFound),
            6 => Some(Self::PreconditionFailed),
            7 => Some(Self::PremiumRequired),
            130 => Some(Self::Interrupted),
            _ => None,
        }
    }

    /// Exit code for a reply status from the service
    pub fn from_status(status: &str) -> Self {
        match status {
            "ok" => Self::Success,
            "error-auth" => Self::AuthError,
            "error-notFound" | "error-wrongFolder" | "error-wrongContent" => Self::NotFound,
            "error-notPremium" => Self::PremiumRequired,
            _ => Self::GeneralError,
        }
    }

    /// Exit code for a local error
    pub fn from_error(err: &gf_core::Error) -> Self {
        Self::from_i32(err.exit_code()).unwrap_or(Self::GeneralError)
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Operation completed successfully",
            Self::GeneralError => "General error",
            Self::UsageError => "Invalid arguments or input",
            Self::NetworkError => "Network error",
            Self::AuthError => "Authentication failure",
            Self::NotFound => "Content not found",
            Self::PreconditionFailed => "Session cannot perform this operation",
            Self::PremiumRequired => "Feature requires a premium account",
            Self::Interrupted => "Operation interrupted",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
