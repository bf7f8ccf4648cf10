//! Error types reported by the licensing collaborator.

use thiserror::Error;

/// Failures raised by the licensing SDK.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// A decode or decrypt call was made before `initialize` succeeded.
    #[error("sdk not initialized")]
    NotInitialized,

    /// SDK initialization failed.
    #[error("{0}")]
    Init(String),

    /// The barcode payload could not be decoded into a document.
    #[error("{0}")]
    Decode(String),

    /// The barcode payload could not be decrypted.
    #[error("{0}")]
    Payload(String),

    /// The status query failed.
    #[error("status unavailable: {0}")]
    Status(String),
}

/// Result type for licensing operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
