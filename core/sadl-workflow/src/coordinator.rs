//! The activation and decode workflow coordinator.
//!
//! Owns the only shared mutable state in the shell (busy flag, last observed
//! status, audit log and the currently displayed decode result) and sequences
//! every call into the licensing SDK:
//!
//! - activation and token import are single-flight: a second attempt while
//!   one is running is rejected with [`WorkflowError::Busy`]
//! - every SDK call is wrapped so failures and panics come back as typed
//!   results, each producing exactly one audit log line
//! - status is re-queried after every activation-affecting operation
//!
//! The state lock is never held across an SDK call or an `.await`.

use crate::audit::AuditLog;
use crate::config::WorkflowConfig;
use crate::error::{WorkflowError, WorkflowResult};
use crate::form::{ActivationForm, require_input};
use crate::view::{ActionGates, DocumentView, Intent, Notice, WorkflowSnapshot};
use sadl_license::{
    ActivationOutcome, ActivationRequest, ActivationStatus, DecodedDocument, FingerprintProvider,
    LicensingClient,
};
use futures::FutureExt;
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

const PROMPT_TOKEN: &str = "Paste a token";
const PROMPT_PAYLOAD: &str = "Paste PDF417 base64";

/// Mutable workflow state. One instance per coordinator.
#[derive(Debug)]
struct WorkflowState {
    busy: bool,
    last_status: ActivationStatus,
    log: AuditLog,
    document: Option<DocumentView>,
    photo: Option<Vec<u8>>,
    payload_len: Option<usize>,
    notice: Option<Notice>,
}

struct Inner {
    client: Arc<dyn LicensingClient>,
    fingerprint: String,
    config: WorkflowConfig,
    state: Mutex<WorkflowState>,
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, WorkflowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the busy flag for the lifetime of one activation or import.
///
/// Dropping it clears the flag, so every exit path releases the flight,
/// including panics and cancellation of the owning task.
struct FlightGuard {
    inner: Arc<Inner>,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.inner.state().busy = false;
        debug!("activation flight released");
    }
}

/// Coordinates licensing operations for one session.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct WorkflowCoordinator {
    inner: Arc<Inner>,
}

impl WorkflowCoordinator {
    /// Creates a coordinator with the default configuration.
    pub fn new(client: Arc<dyn LicensingClient>, fingerprint: &dyn FingerprintProvider) -> Self {
        Self::with_config(client, fingerprint, WorkflowConfig::default())
    }

    /// Creates a coordinator with a custom configuration.
    pub fn with_config(
        client: Arc<dyn LicensingClient>,
        fingerprint: &dyn FingerprintProvider,
        config: WorkflowConfig,
    ) -> Self {
        let state = WorkflowState {
            busy: false,
            last_status: ActivationStatus::Unknown,
            log: AuditLog::with_capacity(config.log_capacity),
            document: None,
            photo: None,
            payload_len: None,
            notice: None,
        };
        Self {
            inner: Arc::new(Inner {
                client,
                fingerprint: fingerprint.fingerprint(),
                config,
                state: Mutex::new(state),
            }),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &WorkflowConfig {
        &self.inner.config
    }

    /// Returns the device fingerprint captured at construction.
    pub fn fingerprint(&self) -> &str {
        &self.inner.fingerprint
    }

    /// Returns true while an activation or import is in flight.
    pub fn is_busy(&self) -> bool {
        self.inner.state().busy
    }

    /// Returns the last status observed by [`check_status`](Self::check_status).
    pub fn last_status(&self) -> ActivationStatus {
        self.inner.state().last_status.clone()
    }

    /// Returns which intents are currently enabled.
    pub fn gates(&self) -> ActionGates {
        let state = self.inner.state();
        ActionGates::compute(state.busy, &state.last_status)
    }

    /// Rendered audit log lines, newest first.
    pub fn log_lines(&self) -> Vec<String> {
        self.inner.state().log.entries().map(ToString::to_string).collect()
    }

    /// Returns a snapshot of the current state. Leaves the notice in place.
    pub fn snapshot(&self) -> WorkflowSnapshot {
        let state = self.inner.state();
        self.snapshot_of(&state, state.notice.clone())
    }

    /// Returns a snapshot and consumes the pending notice.
    pub fn take_snapshot(&self) -> WorkflowSnapshot {
        let mut state = self.inner.state();
        let notice = state.notice.take();
        self.snapshot_of(&state, notice)
    }

    fn snapshot_of(&self, state: &WorkflowState, notice: Option<Notice>) -> WorkflowSnapshot {
        WorkflowSnapshot {
            busy: state.busy,
            last_status: state.last_status.clone(),
            log: state.log.to_vec(),
            document: state.document.clone(),
            photo: state.photo.clone(),
            payload_len: state.payload_len,
            notice,
            fingerprint: self.inner.fingerprint.clone(),
            gates: ActionGates::compute(state.busy, &state.last_status),
        }
    }

    // ── Operations ───────────────────────────────────────────────

    /// Initializes the SDK.
    ///
    /// Failures are logged and returned but are not fatal; the call may be
    /// repeated.
    pub fn initialize(&self) -> WorkflowResult<()> {
        let result = match guarded(|| self.inner.client.initialize()) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(e.to_string()),
            Err(fault) => Err(fault),
        };
        match result {
            Ok(()) => {
                info!("sdk initialized");
                self.record("INIT ok".to_string(), Notice::info("SDK initialized"));
                Ok(())
            }
            Err(message) => {
                warn!(%message, "sdk init failed");
                self.record(
                    format!("INIT failed: {message}"),
                    Notice::error(format!("Init failed: {message}")),
                );
                Err(WorkflowError::Init(message))
            }
        }
    }

    /// Queries the SDK for the current status and caches it.
    ///
    /// Never fails: SDK errors are reported as [`ActivationStatus::Error`].
    pub fn check_status(&self) -> ActivationStatus {
        let status = self.query_status();
        let mut state = self.inner.state();
        store_status(&mut state, &status);
        state.notice = Some(Notice::info(format!("Activation: {status}")));
        status
    }

    /// Runs an online activation and waits for it to finish.
    ///
    /// Equivalent to awaiting the handle returned by
    /// [`dispatch_activation`](Self::dispatch_activation).
    pub async fn activate_online(&self, form: &ActivationForm) -> WorkflowResult<ActivationOutcome> {
        let task = self.dispatch_activation(form)?;
        match task.await {
            Ok(result) => result,
            Err(e) => Err(WorkflowError::Fault(join_error_message(e))),
        }
    }

    /// Validates the form, marks the workflow busy and starts the activation
    /// on a background task.
    ///
    /// The busy flag is set before this returns. The task logs the outcome,
    /// refreshes status and only then clears the flag. Aborting the returned
    /// handle cancels the SDK call together with the task. Must be called
    /// from within a Tokio runtime.
    pub fn dispatch_activation(
        &self,
        form: &ActivationForm,
    ) -> WorkflowResult<JoinHandle<WorkflowResult<ActivationOutcome>>> {
        let request = form
            .normalize(&self.inner.config)
            .map_err(|e| self.rejected(e))?;
        let flight = self.begin_flight("activate").map_err(|e| self.rejected(e))?;

        let this = self.clone();
        Ok(tokio::spawn(async move {
            this.run_activation(flight, request).await
        }))
    }

    /// Drives one activation attempt. The SDK future runs inside this task,
    /// so cancelling the task or hitting the timeout drops it before the
    /// flight guard is released.
    async fn run_activation(
        &self,
        flight: FlightGuard,
        request: ActivationRequest,
    ) -> WorkflowResult<ActivationOutcome> {
        let timeout = self.inner.config.activation_timeout();
        info!(
            base_url = %request.base_url,
            product = %request.product,
            years = request.years,
            "dispatching online activation"
        );

        let call = AssertUnwindSafe(self.inner.client.activate_online(&request)).catch_unwind();
        let result = match tokio::time::timeout(timeout, call).await {
            Ok(Ok(outcome)) => {
                info!(%outcome, "activation finished");
                let notice = if outcome.is_success() {
                    Notice::info("Activation success")
                } else {
                    Notice::error(outcome.label())
                };
                self.record(format!("ACTIVATE → {outcome}"), notice);
                Ok(outcome)
            }
            Ok(Err(payload)) => {
                let message = panic_message(payload);
                warn!(%message, "activation call panicked");
                self.record(
                    format!("ACTIVATE → FAIL: {message}"),
                    Notice::error(format!("Activation failed: {message}")),
                );
                Err(WorkflowError::Fault(message))
            }
            Err(_) => {
                let timeout_ms = timeout.as_millis();
                warn!(%timeout_ms, "activation timed out");
                self.record(
                    format!("ACTIVATE → Timed out after {}s", timeout.as_secs()),
                    Notice::error("Activation timed out"),
                );
                Err(WorkflowError::Timeout(timeout))
            }
        };

        self.refresh_status();
        drop(flight);
        result
    }

    /// Imports an offline activation token.
    ///
    /// Runs on the calling thread but shares the single-flight guard with
    /// online activation.
    pub fn import_offline_token(&self, token: &str) -> WorkflowResult<ActivationOutcome> {
        let token = require_input(token, PROMPT_TOKEN).map_err(|e| self.rejected(e))?;
        let flight = self.begin_flight("import").map_err(|e| self.rejected(e))?;

        let result = match guarded(|| self.inner.client.import_offline_token(token)) {
            Ok(outcome) => {
                info!(%outcome, "token import finished");
                let notice = if outcome.is_success() {
                    Notice::info("Token imported")
                } else {
                    Notice::error(outcome.label())
                };
                self.record(format!("IMPORT → {outcome}"), notice);
                Ok(outcome)
            }
            Err(fault) => {
                warn!(%fault, "token import crashed");
                self.record(
                    format!("IMPORT → FAIL: {fault}"),
                    Notice::error(format!("Import failed: {fault}")),
                );
                Err(WorkflowError::Fault(fault))
            }
        };

        self.refresh_status();
        drop(flight);
        result
    }

    /// Removes any installed token and refreshes status.
    pub fn clear_token(&self) {
        match guarded(|| self.inner.client.clear_token()) {
            Ok(()) => {
                info!("token cleared");
                self.record("CLEAR → OK".to_string(), Notice::info("Token cleared"));
            }
            Err(fault) => {
                warn!(%fault, "token clear crashed");
                self.record(
                    format!("CLEAR → FAIL: {fault}"),
                    Notice::error(format!("Clear failed: {fault}")),
                );
            }
        }
        self.refresh_status();
    }

    /// Decodes a base64 PDF417 payload into a document.
    ///
    /// On failure any previously displayed document and photo are cleared.
    /// The audit log only records the subject ID and photo size.
    pub fn decode_document(
        &self,
        payload: &str,
        include_photo: bool,
    ) -> WorkflowResult<DecodedDocument> {
        let payload = require_input(payload, PROMPT_PAYLOAD).map_err(|e| self.rejected(e))?;

        let result = match guarded(|| self.inner.client.decode_document(payload, include_photo)) {
            Ok(Ok(doc)) => Ok(doc),
            Ok(Err(e)) => Err(e.to_string()),
            Err(fault) => Err(fault),
        };

        match result {
            Ok(doc) => {
                let photo = doc.photo().map(<[u8]>::to_vec);
                let summary = match &photo {
                    Some(bytes) => format!("photo={} bytes", bytes.len()),
                    None => "no photo".to_string(),
                };
                debug!(id = %doc.id_number, %summary, "document decoded");

                let mut state = self.inner.state();
                state.log.append(format!("DECODE → OK (ID={}, {summary})", doc.id_number));
                state.document = Some(DocumentView::from_document(&doc));
                state.photo = photo;
                state.notice = Some(Notice::info(format!("Decoded ID {}", doc.id_number)));
                Ok(doc)
            }
            Err(message) => {
                warn!(%message, "decode failed");
                let mut state = self.inner.state();
                state.log.append(format!("DECODE → FAIL: {message}"));
                state.document = None;
                state.photo = None;
                state.notice = Some(Notice::error(format!("Decode failed: {message}")));
                Err(WorkflowError::Decode(message))
            }
        }
    }

    /// Decrypts a base64 PDF417 payload and returns the raw bytes.
    pub fn extract_payload(&self, payload: &str) -> WorkflowResult<Vec<u8>> {
        let payload = require_input(payload, PROMPT_PAYLOAD).map_err(|e| self.rejected(e))?;

        let result = match guarded(|| self.inner.client.decrypt_payload(payload)) {
            Ok(Ok(bytes)) => Ok(bytes),
            Ok(Err(e)) => Err(e.to_string()),
            Err(fault) => Err(fault),
        };

        let mut state = self.inner.state();
        match result {
            Ok(bytes) => {
                state.log.append(format!("PAYLOAD → {} bytes", bytes.len()));
                state.payload_len = Some(bytes.len());
                state.notice = Some(Notice::info(format!("Payload {} bytes", bytes.len())));
                Ok(bytes)
            }
            Err(message) => {
                state.log.append(format!("PAYLOAD → FAIL: {message}"));
                state.payload_len = None;
                state.notice = Some(Notice::error(format!("Payload failed: {message}")));
                Err(WorkflowError::Decode(message))
            }
        }
    }

    /// Runs one intent from the presentation surface and returns the
    /// resulting snapshot, carrying that intent's notice.
    pub async fn handle(&self, intent: Intent) -> WorkflowSnapshot {
        debug!(?intent, "handling intent");
        // Errors are already reflected in the log and the notice.
        match intent {
            Intent::Initialize => {
                let _ = self.initialize();
            }
            Intent::CheckStatus => {
                self.check_status();
            }
            Intent::Activate {
                base_url,
                api_key,
                product,
                years,
            } => {
                let form = ActivationForm::new(base_url, api_key, product, years);
                let _ = self.activate_online(&form).await;
            }
            Intent::ImportToken { token } => {
                let _ = self.import_offline_token(&token);
            }
            Intent::ClearToken => self.clear_token(),
            Intent::Decode { payload } => {
                let _ = self.decode_document(&payload, true);
            }
            Intent::ExtractPayload { payload } => {
                let _ = self.extract_payload(&payload);
            }
        }
        self.take_snapshot()
    }

    // ── Internals ────────────────────────────────────────────────

    fn begin_flight(&self, operation: &str) -> WorkflowResult<FlightGuard> {
        let mut state = self.inner.state();
        if state.busy {
            warn!(operation, "rejected: activation already in flight");
            return Err(WorkflowError::Busy);
        }
        state.busy = true;
        debug!(operation, "activation flight acquired");
        Ok(FlightGuard {
            inner: Arc::clone(&self.inner),
        })
    }

    /// Appends a log line and sets the notice in one critical section.
    fn record(&self, message: String, notice: Notice) {
        let mut state = self.inner.state();
        state.log.append(message);
        state.notice = Some(notice);
    }

    fn query_status(&self) -> ActivationStatus {
        let status = match guarded(|| self.inner.client.status()) {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => ActivationStatus::Error(e.to_string()),
            Err(fault) => ActivationStatus::Error(fault),
        };
        debug!(%status, "status refreshed");
        status
    }

    /// Status refresh after an operation whose own notice should win.
    /// Leaves the current notice alone.
    fn refresh_status(&self) {
        let status = self.query_status();
        store_status(&mut self.inner.state(), &status);
    }

    /// Surfaces a local rejection as a notice. Nothing is logged.
    fn rejected(&self, err: WorkflowError) -> WorkflowError {
        let text = match &err {
            WorkflowError::Busy => "Activation in progress".to_string(),
            other => other.to_string(),
        };
        self.inner.state().notice = Some(Notice::error(text));
        err
    }
}

fn store_status(state: &mut WorkflowState, status: &ActivationStatus) {
    state.last_status = status.clone();
    state.log.append(format!("STATUS = {status}"));
}

/// Runs a synchronous SDK call, turning a panic into its message.
fn guarded<T>(call: impl FnOnce() -> T) -> Result<T, String> {
    catch_unwind(AssertUnwindSafe(call)).map_err(panic_message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn join_error_message(err: JoinError) -> String {
    match err.try_into_panic() {
        Ok(payload) => panic_message(payload),
        Err(err) => err.to_string(),
    }
}
