use std::{error::Error as StdError, fmt, io, result::Result as StdResult};

use crate::contact::SubmitRejected;

/// Rejection reported by a notification sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    Network(String),
    Service { status: u16, message: String },
    NotConfigured,
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {msg}"),
            Self::Service { status, message } if message.is_empty() => {
                write!(f, "Relay rejected message (HTTP {status})")
            }
            Self::Service { status, message } => {
                write!(f, "Relay rejected message (HTTP {status}): {message}")
            }
            Self::NotConfigured => {
                writeln!(f, "Email relay is not configured.")?;
                writeln!(f)?;
                writeln!(f, "Add a [relay] section to config.toml:")?;
                writeln!(f)?;
                writeln!(f, "  [relay]")?;
                writeln!(f, "  service_id = \"...\"")?;
                writeln!(f, "  template_id = \"...\"")?;
                write!(f, "  public_key = \"...\"")
            }
        }
    }
}

impl StdError for SendError {}

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Json(serde_json::Error),
    Toml(toml::de::Error),
    /// A config value that parses but cannot be used.
    InvalidConfig(String),
    Send(SendError),
    Rejected(SubmitRejected),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Toml(e) => write!(f, "Config error: {e}"),
            Self::InvalidConfig(msg) => write!(f, "Config error: {msg}"),
            Self::Send(e) => write!(f, "Send error: {e}"),
            Self::Rejected(e) => write!(f, "{e}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Send(e) => Some(e),
            Self::Rejected(e) => Some(e),
            Self::InvalidConfig(_) => None,
        }
    }
}

impl From<SendError> for Error {
    fn from(e: SendError) -> Self {
        Self::Send(e)
    }
}

impl From<SubmitRejected> for Error {
    fn from(e: SubmitRejected) -> Self {
        Self::Rejected(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

pub type Result<T> = StdResult<T, Error>;
