//! Shared test helpers for workflow tests.

#![allow(dead_code)]

use sadl_license::mock::MockLicensing;
use sadl_license::{FingerprintProvider, LicensingClient};
use sadl_workflow::{ActivationForm, WorkflowConfig, WorkflowCoordinator};
use std::sync::Arc;

pub const FINGERPRINT: &str = "dGVzdC1kZXZpY2UtMDAx";

/// Fingerprint provider returning a fixed ID.
pub struct FixedFingerprint;

impl FingerprintProvider for FixedFingerprint {
    fn fingerprint(&self) -> String {
        FINGERPRINT.to_string()
    }
}

/// Builds a coordinator over `mock` with the default configuration.
pub fn coordinator(mock: MockLicensing) -> (WorkflowCoordinator, Arc<MockLicensing>) {
    coordinator_with(mock, WorkflowConfig::default())
}

/// Builds a coordinator over `mock` with a custom configuration.
pub fn coordinator_with(
    mock: MockLicensing,
    config: WorkflowConfig,
) -> (WorkflowCoordinator, Arc<MockLicensing>) {
    let mock = Arc::new(mock);
    let client: Arc<dyn LicensingClient> = mock.clone();
    let coordinator = WorkflowCoordinator::with_config(client, &FixedFingerprint, config);
    (coordinator, mock)
}

/// An activation form with the given raw fields.
pub fn form(base_url: &str, api_key: &str, product: &str, years: &str) -> ActivationForm {
    ActivationForm::new(base_url, api_key, product, years)
}

/// A valid form for the test activation server.
pub fn valid_form() -> ActivationForm {
    form("https://x", "k", "SADL-PRO", "1")
}

/// Audit log messages, newest first, without timestamps.
pub fn messages(coordinator: &WorkflowCoordinator) -> Vec<String> {
    coordinator
        .snapshot()
        .log
        .into_iter()
        .map(|e| e.message)
        .collect()
}
