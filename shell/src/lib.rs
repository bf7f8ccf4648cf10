//! Terminal demo shell for the SADL activation workflow.
//!
//! Stands in for the mobile front end: commands map to the same intents the
//! buttons would issue, and every result is rendered from a coordinator
//! snapshot.

mod command;
mod config;
mod session;

pub use command::{Command, Field, HELP, ParseError};
pub use config::{ShellConfig, default_config_path, load_config};
pub use session::{Flow, Session, render_form, render_snapshot};
