//! Error types for the workflow coordinator.

use std::time::Duration;
use thiserror::Error;

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Errors surfaced by the coordinator.
///
/// Rejected or failed activation attempts are not errors: they come back as
/// `Ok(ActivationOutcome::..)` so callers see the SDK's own verdict.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// User input was rejected before reaching the SDK.
    #[error("{0}")]
    Validation(String),

    /// An activation or token import is already in flight.
    #[error("another activation is in progress")]
    Busy,

    /// SDK initialization failed. Later operations may still be attempted.
    #[error("init failed: {0}")]
    Init(String),

    /// The SDK could not decode or decrypt the payload.
    #[error("decode failed: {0}")]
    Decode(String),

    /// Online activation did not complete in time.
    #[error("activation timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The SDK crashed while handling the call.
    #[error("licensing backend fault: {0}")]
    Fault(String),
}

impl WorkflowError {
    /// Returns true for errors raised before anything was dispatched.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Busy)
    }
}
