//! Types crossing the presentation boundary: intents in, snapshots out.

use crate::audit::LogEntry;
use sadl_license::{ActivationStatus, DecodedDocument};
use serde::{Deserialize, Serialize};

/// A user action issued by the presentation surface, carrying raw field text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "intent")]
pub enum Intent {
    Initialize,
    CheckStatus,
    Activate {
        base_url: String,
        api_key: String,
        product: String,
        years: String,
    },
    ImportToken {
        token: String,
    },
    ClearToken,
    Decode {
        payload: String,
    },
    ExtractPayload {
        payload: String,
    },
}

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient notification shown once after an intent completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Display lines for a decoded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentView {
    /// Ordered `(label, value)` pairs.
    pub lines: Vec<(String, String)>,
}

impl DocumentView {
    /// Builds the view-model from a decoded document.
    #[must_use]
    pub fn from_document(doc: &DecodedDocument) -> Self {
        let photo = match doc.photo() {
            Some(bytes) => format!("{} bytes", bytes.len()),
            None => "none".to_string(),
        };
        let lines = [
            ("Name", doc.full_name()),
            ("ID", format!("{} ({})", doc.id_number, doc.gender)),
            ("Birth", doc.birth_date.clone()),
            ("Licence #", doc.license_number.clone()),
            ("Issue#", doc.license_issue_number.clone()),
            ("Valid", format!("{} → {}", doc.valid_from, doc.valid_to)),
            ("Vehicle codes", doc.vehicle_codes.join(",")),
            ("Restrictions", doc.driver_restrictions.clone()),
            ("PRDP", format!("{} exp {}", doc.prdp_code, doc.prdp_expiry)),
            ("Photo", photo),
        ];
        Self {
            lines: lines
                .into_iter()
                .map(|(label, value)| (label.to_string(), value))
                .collect(),
        }
    }

    /// Looks up a value by label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    /// Renders the view as `Label: value` lines.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|(label, value)| format!("{label}: {value}\n"))
            .collect()
    }
}

/// Which intents the surface should currently offer.
///
/// Advisory only: the coordinator re-validates on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionGates {
    pub initialize: bool,
    pub check_status: bool,
    pub activate: bool,
    pub import_token: bool,
    pub clear_token: bool,
    pub decode: bool,
    pub extract_payload: bool,
    /// The cached status says a decode is expected to be licensed.
    pub decode_ready: bool,
}

impl ActionGates {
    /// Derives the gates from the busy flag and the cached status.
    #[must_use]
    pub fn compute(busy: bool, status: &ActivationStatus) -> Self {
        let idle = !busy;
        Self {
            initialize: true,
            check_status: true,
            activate: idle,
            import_token: idle,
            clear_token: idle,
            decode: idle,
            extract_payload: idle,
            decode_ready: idle && status.is_licensed(),
        }
    }

    /// Returns whether `intent` is currently enabled.
    #[must_use]
    pub fn allows(&self, intent: &Intent) -> bool {
        match intent {
            Intent::Initialize => self.initialize,
            Intent::CheckStatus => self.check_status,
            Intent::Activate { .. } => self.activate,
            Intent::ImportToken { .. } => self.import_token,
            Intent::ClearToken => self.clear_token,
            Intent::Decode { .. } => self.decode,
            Intent::ExtractPayload { .. } => self.extract_payload,
        }
    }
}

/// Read-only view of the coordinator's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSnapshot {
    pub busy: bool,
    pub last_status: ActivationStatus,
    /// Newest first.
    pub log: Vec<LogEntry>,
    pub document: Option<DocumentView>,
    pub photo: Option<Vec<u8>>,
    pub payload_len: Option<usize>,
    pub notice: Option<Notice>,
    pub fingerprint: String,
    pub gates: ActionGates,
}

impl WorkflowSnapshot {
    /// Log lines rendered for display, newest first.
    #[must_use]
    pub fn log_lines(&self) -> Vec<String> {
        self.log.iter().map(ToString::to_string).collect()
    }
}
