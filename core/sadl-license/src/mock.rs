//! A scripted licensing collaborator.
//!
//! Stands in for the proprietary SDK in tests and in the demo shell. It keeps
//! just enough state to be believable (installing a token makes the status
//! `Valid`, clearing makes it `Unlicensed`) and records how it was called so
//! tests can assert on dispatch counts and concurrency.

use crate::client::{ActivationRequest, LicensingClient};
use crate::document::DecodedDocument;
use crate::error::{LicenseError, LicenseResult};
use crate::outcome::{ActivationOutcome, ActivationStatus};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Default)]
struct MockState {
    initialized: bool,
    require_init: bool,
    installed: Option<ActivationStatus>,
    activation_outcome: Option<ActivationOutcome>,
    import_outcome: Option<ActivationOutcome>,
    activation_delay: Option<Duration>,
    init_failure: Option<String>,
    status_failure: Option<String>,
    decode_failure: Option<String>,
    payload_failure: Option<String>,
    document: Option<DecodedDocument>,
    panic_on_activate: bool,
    panic_on_import: bool,
    panic_on_clear: bool,
    last_request: Option<ActivationRequest>,
    last_token: Option<String>,
}

impl MockState {
    fn ensure_initialized(&self) -> LicenseResult<()> {
        if self.require_init && !self.initialized {
            return Err(LicenseError::NotInitialized);
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Counters {
    init: AtomicUsize,
    activate: AtomicUsize,
    import: AtomicUsize,
    clear: AtomicUsize,
    status: AtomicUsize,
    decode: AtomicUsize,
    payload: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// Scripted, in-memory [`LicensingClient`].
#[derive(Debug, Default)]
pub struct MockLicensing {
    state: Mutex<MockState>,
    counters: Counters,
}

impl MockLicensing {
    /// Creates a collaborator that accepts every activation and import.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every online activation return `outcome`.
    #[must_use]
    pub fn with_activation_outcome(self, outcome: ActivationOutcome) -> Self {
        self.lock().activation_outcome = Some(outcome);
        self
    }

    /// Makes every token import return `outcome`.
    #[must_use]
    pub fn with_import_outcome(self, outcome: ActivationOutcome) -> Self {
        self.lock().import_outcome = Some(outcome);
        self
    }

    /// Delays online activation to simulate a network round trip.
    #[must_use]
    pub fn with_activation_delay(self, delay: Duration) -> Self {
        self.lock().activation_delay = Some(delay);
        self
    }

    /// Rejects decode and decrypt with [`LicenseError::NotInitialized`] until
    /// `initialize` has succeeded, as the real SDK does.
    #[must_use]
    pub fn requiring_init(self) -> Self {
        self.lock().require_init = true;
        self
    }

    /// Makes `initialize` fail with `message`.
    #[must_use]
    pub fn with_init_failure(self, message: impl Into<String>) -> Self {
        self.lock().init_failure = Some(message.into());
        self
    }

    /// Makes `status` fail with `message`.
    #[must_use]
    pub fn with_status_failure(self, message: impl Into<String>) -> Self {
        self.lock().status_failure = Some(message.into());
        self
    }

    /// Makes `decode_document` fail with `message`.
    #[must_use]
    pub fn with_decode_failure(self, message: impl Into<String>) -> Self {
        self.lock().decode_failure = Some(message.into());
        self
    }

    /// Makes `decrypt_payload` fail with `message`.
    #[must_use]
    pub fn with_payload_failure(self, message: impl Into<String>) -> Self {
        self.lock().payload_failure = Some(message.into());
        self
    }

    /// Returns `document` from every successful decode.
    #[must_use]
    pub fn with_document(self, document: DecodedDocument) -> Self {
        self.lock().document = Some(document);
        self
    }

    /// Starts with a token already installed in the given state.
    #[must_use]
    pub fn with_installed(self, status: ActivationStatus) -> Self {
        self.lock().installed = Some(status);
        self
    }

    /// Panics inside `activate_online`.
    #[must_use]
    pub fn panicking_on_activate(self) -> Self {
        self.lock().panic_on_activate = true;
        self
    }

    /// Panics inside `import_offline_token`.
    #[must_use]
    pub fn panicking_on_import(self) -> Self {
        self.lock().panic_on_import = true;
        self
    }

    /// Panics inside `clear_token`.
    #[must_use]
    pub fn panicking_on_clear(self) -> Self {
        self.lock().panic_on_clear = true;
        self
    }

    /// Replaces the activation outcome after construction.
    pub fn set_activation_outcome(&self, outcome: ActivationOutcome) {
        self.lock().activation_outcome = Some(outcome);
    }

    /// Returns true once `initialize` has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.lock().initialized
    }

    /// The most recent online activation request.
    pub fn last_request(&self) -> Option<ActivationRequest> {
        self.lock().last_request.clone()
    }

    /// The most recent imported token.
    pub fn last_token(&self) -> Option<String> {
        self.lock().last_token.clone()
    }

    /// Number of `initialize` calls.
    pub fn init_calls(&self) -> usize {
        self.counters.init.load(Ordering::SeqCst)
    }

    /// Number of `activate_online` calls.
    pub fn activation_calls(&self) -> usize {
        self.counters.activate.load(Ordering::SeqCst)
    }

    /// Number of `import_offline_token` calls.
    pub fn import_calls(&self) -> usize {
        self.counters.import.load(Ordering::SeqCst)
    }

    /// Number of `clear_token` calls.
    pub fn clear_calls(&self) -> usize {
        self.counters.clear.load(Ordering::SeqCst)
    }

    /// Number of `status` calls.
    pub fn status_calls(&self) -> usize {
        self.counters.status.load(Ordering::SeqCst)
    }

    /// Number of `decode_document` calls.
    pub fn decode_calls(&self) -> usize {
        self.counters.decode.load(Ordering::SeqCst)
    }

    /// Number of `decrypt_payload` calls.
    pub fn payload_calls(&self) -> usize {
        self.counters.payload.load(Ordering::SeqCst)
    }

    /// Highest number of activation/import calls observed running at once.
    pub fn max_concurrent_activations(&self) -> usize {
        self.counters.max_in_flight.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enter(&self) -> InFlight<'_> {
        let now = self.counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.max_in_flight.fetch_max(now, Ordering::SeqCst);
        InFlight(&self.counters.in_flight)
    }

    fn install(&self, outcome: &ActivationOutcome) {
        if outcome.is_success() {
            self.lock().installed = Some(ActivationStatus::Valid);
        }
    }

    fn decode_base64(payload: &str) -> Result<Vec<u8>, String> {
        BASE64
            .decode(payload.trim())
            .map_err(|e| format!("invalid base64 payload: {e}"))
    }
}

/// Decrements the in-flight counter when the call ends, even if cancelled.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A plausible document used when no document was scripted.
#[must_use]
pub fn sample_document() -> DecodedDocument {
    DecodedDocument {
        first_names: "THANDI M".to_string(),
        surname: "NKOSI".to_string(),
        id_number: "9001014800086".to_string(),
        gender: "F".to_string(),
        birth_date: "1990-01-01".to_string(),
        license_number: "40930001LMTN".to_string(),
        license_issue_number: "02".to_string(),
        valid_from: "2021-03-15".to_string(),
        valid_to: "2026-03-14".to_string(),
        vehicle_codes: vec!["B".to_string(), "EB".to_string()],
        driver_restrictions: "00".to_string(),
        prdp_code: "-".to_string(),
        prdp_expiry: "-".to_string(),
        photo_jpeg: Some(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0xFF, 0xD9]),
    }
}

#[async_trait]
impl LicensingClient for MockLicensing {
    fn initialize(&self) -> LicenseResult<()> {
        self.counters.init.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock();
        if let Some(message) = &state.init_failure {
            return Err(LicenseError::Init(message.clone()));
        }
        state.initialized = true;
        Ok(())
    }

    async fn activate_online(&self, request: &ActivationRequest) -> ActivationOutcome {
        self.counters.activate.fetch_add(1, Ordering::SeqCst);
        let _in_flight = self.enter();

        let (delay, panic, scripted) = {
            let mut state = self.lock();
            state.last_request = Some(request.clone());
            (
                state.activation_delay,
                state.panic_on_activate,
                state.activation_outcome.clone(),
            )
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if panic {
            panic!("activation backend crashed");
        }

        let outcome = scripted.unwrap_or(ActivationOutcome::Success);
        debug!(product = %request.product, years = request.years, %outcome, "mock activation");
        self.install(&outcome);
        outcome
    }

    fn import_offline_token(&self, token: &str) -> ActivationOutcome {
        self.counters.import.fetch_add(1, Ordering::SeqCst);
        let _in_flight = self.enter();

        let (panic, scripted) = {
            let mut state = self.lock();
            state.last_token = Some(token.to_string());
            (state.panic_on_import, state.import_outcome.clone())
        };
        if panic {
            panic!("token importer crashed");
        }

        let outcome = scripted.unwrap_or(ActivationOutcome::Success);
        self.install(&outcome);
        outcome
    }

    fn clear_token(&self) {
        self.counters.clear.fetch_add(1, Ordering::SeqCst);
        let panic = self.lock().panic_on_clear;
        if panic {
            panic!("token store unavailable");
        }
        self.lock().installed = None;
    }

    fn status(&self) -> LicenseResult<ActivationStatus> {
        self.counters.status.fetch_add(1, Ordering::SeqCst);
        let state = self.lock();
        if let Some(message) = &state.status_failure {
            return Err(LicenseError::Status(message.clone()));
        }
        Ok(state
            .installed
            .clone()
            .unwrap_or(ActivationStatus::Unlicensed))
    }

    fn decode_document(
        &self,
        base64: &str,
        include_photo: bool,
    ) -> LicenseResult<DecodedDocument> {
        self.counters.decode.fetch_add(1, Ordering::SeqCst);
        let (failure, scripted) = {
            let state = self.lock();
            state.ensure_initialized()?;
            (state.decode_failure.clone(), state.document.clone())
        };
        if let Some(message) = failure {
            return Err(LicenseError::Decode(message));
        }
        Self::decode_base64(base64).map_err(LicenseError::Decode)?;

        let mut document = scripted.unwrap_or_else(sample_document);
        if !include_photo {
            document.photo_jpeg = None;
        }
        Ok(document)
    }

    fn decrypt_payload(&self, base64: &str) -> LicenseResult<Vec<u8>> {
        self.counters.payload.fetch_add(1, Ordering::SeqCst);
        let failure = {
            let state = self.lock();
            state.ensure_initialized()?;
            state.payload_failure.clone()
        };
        if let Some(message) = failure {
            return Err(LicenseError::Payload(message));
        }
        Self::decode_base64(base64).map_err(LicenseError::Payload)
    }
}
