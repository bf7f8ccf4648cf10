//! Parsing of shell input lines into commands.

use thiserror::Error;

/// Activation form fields editable with `set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Url,
    Key,
    Product,
    Years,
}

impl Field {
    fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "url" | "base_url" => Some(Self::Url),
            "key" | "api_key" => Some(Self::Key),
            "product" => Some(Self::Product),
            "years" => Some(Self::Years),
            _ => None,
        }
    }
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Init,
    Status,
    Set(Field, String),
    Form,
    Activate,
    Wait,
    Import(String),
    Clear,
    Decode(String),
    Payload(String),
    Log(Option<usize>),
    Show,
    Fingerprint,
}

/// Errors from [`Command::parse`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("unknown field `{0}` (url, key, product, years)")]
    UnknownField(String),

    #[error("invalid count `{0}`")]
    InvalidCount(String),
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    ///
    /// Arguments are passed through untrimmed beyond the separating space so
    /// the workflow sees input exactly as a form field would.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim_start();
        if line.trim().is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_end_matches(['\r', '\n'])),
            None => (line.trim_end(), ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "init" => Self::Init,
            "status" => Self::Status,
            "form" => Self::Form,
            "activate" => Self::Activate,
            "wait" => Self::Wait,
            "clear" => Self::Clear,
            "show" => Self::Show,
            "fingerprint" | "fp" => Self::Fingerprint,
            // Empty arguments are left for the workflow to reject.
            "import" => Self::Import(rest.to_string()),
            "decode" => Self::Decode(rest.to_string()),
            "payload" => Self::Payload(rest.to_string()),
            "log" => match rest.trim() {
                "" => Self::Log(None),
                n => Self::Log(Some(
                    n.parse()
                        .map_err(|_| ParseError::InvalidCount(n.to_string()))?,
                )),
            },
            "set" => {
                let rest = rest.trim_start();
                let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if name.is_empty() {
                    return Err(ParseError::MissingArgument("set"));
                }
                let field =
                    Field::parse(name).ok_or_else(|| ParseError::UnknownField(name.to_string()))?;
                Self::Set(field, value.to_string())
            }
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

pub const HELP: &str = "\
Commands:
  init                   initialize the SDK (required before decode)
  status                 query activation status
  form                   show the activation form
  set <field> <value>    edit the form (url, key, product, years)
  activate               start online activation in the background
  wait                   wait for a running activation to finish
  import <token>         import an offline activation token
  clear                  remove the installed token
  decode <base64>        decode a PDF417 driver's licence payload
  payload <base64>       decrypt a PDF417 payload without parsing
  log [n]                show the audit log (newest first)
  show                   show the current state
  fingerprint            show the device fingerprint
  quit                   exit";
