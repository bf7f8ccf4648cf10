//! Device fingerprinting for license binding.
//!
//! Generates a stable identifier for the host so a token issued for this
//! device can be told apart from one copied from elsewhere.

use crate::client::FingerprintProvider;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::env;

/// A stable fingerprint that identifies this device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceFingerprint {
    /// Hash of the hardware identifiers.
    id: String,
}

impl DeviceFingerprint {
    /// Generates a fingerprint for the current device.
    #[must_use]
    pub fn generate() -> Self {
        Self::from_components(&collect_hardware_ids())
    }

    /// Derives a fingerprint from explicit identifier components.
    #[must_use]
    pub fn from_components(components: &[String]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(components.join("|").as_bytes());
        let hash = hasher.finalize();

        Self {
            id: BASE64.encode(&hash[..16]),
        }
    }

    /// Returns the fingerprint ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl FingerprintProvider for DeviceFingerprint {
    fn fingerprint(&self) -> String {
        self.id.clone()
    }
}

fn collect_hardware_ids() -> Vec<String> {
    let mut ids = vec![
        env::consts::OS.to_string(),
        env::consts::ARCH.to_string(),
        get_hostname(),
    ];

    if let Some(machine_id) = get_machine_id() {
        ids.push(machine_id);
    }

    if let Ok(user) = env::var("USER").or_else(|_| env::var("USERNAME")) {
        ids.push(user);
    }

    ids
}

fn get_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}

fn get_machine_id() -> Option<String> {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    {
        std::fs::read_to_string("/etc/machine-id")
            .or_else(|_| std::fs::read_to_string("/var/lib/dbus/machine-id"))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    {
        None
    }
}
