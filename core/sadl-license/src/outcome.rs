//! Activation verdicts and attempt outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The SDK's current licensing verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "detail")]
pub enum ActivationStatus {
    /// Not queried yet.
    #[default]
    Unknown,
    /// No token installed.
    Unlicensed,
    /// A valid token is installed.
    Valid,
    /// The installed token has expired.
    Expired,
    /// The installed token failed validation.
    Invalid(String),
    /// The status query itself failed.
    Error(String),
}

impl ActivationStatus {
    /// Returns true if the SDK reports a usable license.
    #[must_use]
    pub fn is_licensed(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns true if no token is present (or it was cleared).
    #[must_use]
    pub fn is_unlicensed(&self) -> bool {
        matches!(self, Self::Unlicensed)
    }
}

impl fmt::Display for ActivationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("UNKNOWN"),
            Self::Unlicensed => f.write_str("UNLICENSED"),
            Self::Valid => f.write_str("VALID"),
            Self::Expired => f.write_str("EXPIRED"),
            Self::Invalid(reason) => write!(f, "INVALID ({reason})"),
            Self::Error(message) => write!(f, "ERROR ({message})"),
        }
    }
}

/// The result of one activation or token import attempt.
///
/// Exactly one variant is produced per attempt and only the SDK produces
/// them; callers never fabricate outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ActivationOutcome {
    /// The token was issued (or imported) and installed.
    Success,
    /// The server or importer refused the token.
    TokenRejected {
        /// Reason code reported by the SDK, e.g. `EXPIRED`.
        status: String,
    },
    /// The activation server answered with a non-success HTTP status.
    HttpError {
        /// HTTP status code.
        code: u16,
        /// Response body, when one was returned.
        body: Option<String>,
    },
    /// The server could not be reached.
    NetworkError {
        /// Transport error description.
        message: String,
    },
    /// The server answered with something the SDK could not parse.
    InvalidResponse {
        /// Parse error description.
        message: String,
    },
}

impl ActivationOutcome {
    /// Returns true for [`ActivationOutcome::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Short label for notifications.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Success => "Success".to_string(),
            Self::TokenRejected { status } => format!("Rejected: {status}"),
            Self::HttpError { code, .. } => format!("HTTP {code}"),
            Self::NetworkError { .. } => "Network error".to_string(),
            Self::InvalidResponse { .. } => "Invalid response".to_string(),
        }
    }
}

impl fmt::Display for ActivationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("Success"),
            Self::TokenRejected { status } => write!(f, "Rejected: {status}"),
            Self::HttpError { code, body } => {
                write!(f, "HTTP {code}: {}", body.as_deref().unwrap_or("(no body)"))
            }
            Self::NetworkError { message } => write!(f, "Network error: {message}"),
            Self::InvalidResponse { message } => write!(f, "Invalid response: {message}"),
        }
    }
}
