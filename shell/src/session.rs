//! An interactive session: form state, pending activations and rendering.

use crate::command::{Command, Field, HELP};
use sadl_license::ActivationOutcome;
use sadl_workflow::{
    ActivationForm, NoticeLevel, WorkflowCoordinator, WorkflowResult, WorkflowSnapshot,
};
use std::fmt::Write as _;
use tokio::task::JoinHandle;
use tracing::debug;

type PendingActivation = JoinHandle<WorkflowResult<ActivationOutcome>>;

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit(String),
}

impl Flow {
    /// The text to print.
    pub fn output(&self) -> &str {
        match self {
            Self::Continue(text) | Self::Quit(text) => text,
        }
    }
}

/// Drives a [`WorkflowCoordinator`] from shell commands.
pub struct Session {
    coordinator: WorkflowCoordinator,
    form: ActivationForm,
    pending: Option<PendingActivation>,
    json: bool,
}

impl Session {
    /// Creates a session with the form pre-filled from the coordinator config.
    pub fn new(coordinator: WorkflowCoordinator) -> Self {
        let form = ActivationForm::prefilled(coordinator.config());
        Self {
            coordinator,
            form,
            pending: None,
            json: false,
        }
    }

    /// Prints snapshots as JSON instead of text.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// The current activation form.
    pub fn form(&self) -> &ActivationForm {
        &self.form
    }

    /// The underlying coordinator.
    pub fn coordinator(&self) -> &WorkflowCoordinator {
        &self.coordinator
    }

    /// Returns true while a dispatched activation has not been collected.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Executes one command.
    pub async fn execute(&mut self, command: Command) -> Flow {
        debug!(?command, "executing");
        let mut out = self.reap_finished();

        match command {
            Command::Help => out.push_str(HELP),
            Command::Quit => {
                let last = self.wait_pending().await;
                if !last.is_empty() {
                    out.push_str(&last);
                    out.push('\n');
                }
                out.push_str("bye");
                return Flow::Quit(out);
            }
            Command::Init => {
                let _ = self.coordinator.initialize();
                out.push_str(&self.render_outcome());
            }
            Command::Status => {
                self.coordinator.check_status();
                out.push_str(&self.render_outcome());
            }
            Command::Set(field, value) => {
                match field {
                    Field::Url => self.form.base_url = value,
                    Field::Key => self.form.api_key = value,
                    Field::Product => self.form.product = value,
                    Field::Years => self.form.years = value,
                }
                out.push_str(&render_form(&self.form));
            }
            Command::Form => out.push_str(&render_form(&self.form)),
            Command::Activate => match self.coordinator.dispatch_activation(&self.form) {
                Ok(task) => {
                    self.pending = Some(task);
                    out.push_str("activation dispatched (busy)");
                }
                Err(_) => out.push_str(&self.render_outcome()),
            },
            Command::Wait => out.push_str(&self.wait_pending().await),
            Command::Import(token) => {
                let _ = self.coordinator.import_offline_token(&token);
                out.push_str(&self.render_outcome());
            }
            Command::Clear => {
                self.coordinator.clear_token();
                out.push_str(&self.render_outcome());
            }
            Command::Decode(payload) => {
                let _ = self.coordinator.decode_document(&payload, true);
                out.push_str(&self.render_outcome());
            }
            Command::Payload(payload) => {
                let _ = self.coordinator.extract_payload(&payload);
                out.push_str(&self.render_outcome());
            }
            Command::Log(limit) => {
                let lines = self.coordinator.log_lines();
                let limit = limit.unwrap_or(lines.len());
                out.push_str(&lines.into_iter().take(limit).collect::<Vec<_>>().join("\n"));
            }
            Command::Show => {
                let snapshot = self.coordinator.snapshot();
                out.push_str(&self.render(&snapshot));
            }
            Command::Fingerprint => out.push_str(self.coordinator.fingerprint()),
        }
        Flow::Continue(out)
    }

    /// Waits for a dispatched activation and renders its result.
    pub async fn wait_pending(&mut self) -> String {
        match self.pending.take() {
            Some(task) => {
                let _ = task.await;
                self.render_outcome()
            }
            None => String::new(),
        }
    }

    /// Collects an activation that finished since the last command.
    fn reap_finished(&mut self) -> String {
        if self.pending.as_ref().is_some_and(JoinHandle::is_finished) {
            self.pending = None;
            let mut text = self.render_outcome();
            text.push('\n');
            text
        } else {
            String::new()
        }
    }

    fn render_outcome(&self) -> String {
        let snapshot = self.coordinator.take_snapshot();
        self.render(&snapshot)
    }

    fn render(&self, snapshot: &WorkflowSnapshot) -> String {
        if self.json {
            serde_json::to_string_pretty(snapshot).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
        } else {
            render_snapshot(snapshot)
        }
    }
}

/// Renders the activation form.
pub fn render_form(form: &ActivationForm) -> String {
    format!(
        "url:     {}\nkey:     {}\nproduct: {}\nyears:   {}",
        form.base_url,
        if form.api_key.is_empty() { "(none)" } else { "********" },
        form.product,
        form.years
    )
}

/// Renders a snapshot as text.
pub fn render_snapshot(snapshot: &WorkflowSnapshot) -> String {
    let mut out = String::new();
    if let Some(notice) = &snapshot.notice {
        let marker = match notice.level {
            NoticeLevel::Info => "»",
            NoticeLevel::Error => "!",
        };
        let _ = writeln!(out, "{marker} {}", notice.text);
    }
    let _ = write!(out, "Activation: {}", snapshot.last_status);
    if snapshot.busy {
        out.push_str(" (busy)");
    }
    if let Some(document) = &snapshot.document {
        out.push('\n');
        out.push_str(document.render().trim_end());
    }
    if let Some(len) = snapshot.payload_len {
        let _ = write!(out, "\nPayload: {len} bytes");
    }
    out
}
