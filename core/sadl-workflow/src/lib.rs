//! Activation and decode workflow for the SADL demo shell.
//!
//! The licensing SDK does the real work; this crate decides when it is
//! called and what the user sees afterwards.
//!
//! # Components
//!
//! - **Coordinator**: single-flight activation, outcome mapping, status refresh
//! - **Audit log**: bounded, newest-first record of every operation
//! - **Form**: normalization of raw form text into SDK requests
//! - **View**: intents in, snapshots out, plus action gating
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sadl_license::mock::MockLicensing;
//! use sadl_license::{ActivationStatus, DeviceFingerprint};
//! use sadl_workflow::WorkflowCoordinator;
//!
//! let coordinator = WorkflowCoordinator::new(
//!     Arc::new(MockLicensing::new()),
//!     &DeviceFingerprint::generate(),
//! );
//!
//! coordinator.import_offline_token("offline-token").unwrap();
//! assert_eq!(coordinator.last_status(), ActivationStatus::Valid);
//! assert!(!coordinator.is_busy());
//! ```

mod audit;
mod config;
mod coordinator;
mod error;
mod form;
mod view;

pub use audit::{AuditLog, LogEntry};
pub use config::{DEFAULT_BASE_URL, DEFAULT_PRODUCT, MIN_ACTIVATION_TIMEOUT_MS, WorkflowConfig};
pub use coordinator::WorkflowCoordinator;
pub use error::{WorkflowError, WorkflowResult};
pub use form::{ActivationForm, parse_years};
pub use view::{ActionGates, DocumentView, Intent, Notice, NoticeLevel, WorkflowSnapshot};
