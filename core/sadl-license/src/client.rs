//! The collaborator surface exposed by the licensing SDK.

use crate::document::DecodedDocument;
use crate::error::LicenseResult;
use crate::outcome::{ActivationOutcome, ActivationStatus};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Parameters for an online activation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationRequest {
    /// Activation server base URL.
    pub base_url: String,
    /// API key issued to the integrator.
    pub api_key: String,
    /// Product code to license.
    pub product: String,
    /// License term in years.
    pub years: u32,
}

/// Produces a stable identifier for the current device.
pub trait FingerprintProvider: Send + Sync {
    /// Returns the device fingerprint. Has no side effects.
    fn fingerprint(&self) -> String;
}

/// The licensing SDK as seen by the workflow layer.
///
/// Only `activate_online` is expected to touch the network; everything else
/// is local and fast.
#[async_trait]
pub trait LicensingClient: Send + Sync {
    /// Initializes the SDK. Safe to call more than once.
    fn initialize(&self) -> LicenseResult<()>;

    /// Requests a license from the activation server and installs it.
    async fn activate_online(&self, request: &ActivationRequest) -> ActivationOutcome;

    /// Validates and installs an offline activation token.
    fn import_offline_token(&self, token: &str) -> ActivationOutcome;

    /// Removes any installed token.
    fn clear_token(&self);

    /// Reports the current licensing verdict.
    fn status(&self) -> LicenseResult<ActivationStatus>;

    /// Decrypts and decodes a base64 PDF417 payload into a document.
    fn decode_document(&self, base64: &str, include_photo: bool)
    -> LicenseResult<DecodedDocument>;

    /// Decrypts a base64 PDF417 payload without field parsing.
    fn decrypt_payload(&self, base64: &str) -> LicenseResult<Vec<u8>>;
}
