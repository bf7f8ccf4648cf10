//! Contract for the SADL licensing SDK.
//!
//! The SDK itself is a pre-compiled component that owns every hard part:
//! - License token format and validation
//! - The activation server's wire protocol
//! - PDF417 payload decryption and driver's-license field decoding
//!
//! This crate only describes how the rest of the workspace talks to it:
//!
//! - [`LicensingClient`]: the collaborator surface (init, activation, status, decode)
//! - [`ActivationOutcome`] / [`ActivationStatus`]: closed result sets returned by the SDK
//! - [`DecodedDocument`]: the atomic result of a successful decode
//! - [`FingerprintProvider`]: stable per-device identifier, with a host implementation
//!   in [`DeviceFingerprint`]
//!
//! A scripted stand-in lives in [`mock`] for tests and for the demo shell.

mod client;
mod device;
mod document;
mod error;
pub mod mock;
mod outcome;

pub use client::{ActivationRequest, FingerprintProvider, LicensingClient};
pub use device::DeviceFingerprint;
pub use document::DecodedDocument;
pub use error::{LicenseError, LicenseResult};
pub use outcome::{ActivationOutcome, ActivationStatus};
