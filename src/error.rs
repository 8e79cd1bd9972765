use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TinySvgError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Tag registration error: {0}")]
    Registration(String),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Non-fatal diagnostics produced during conversion.
///
/// Warnings never abort a call; they are logged via `tracing` and collected
/// alongside the result so callers can inspect them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A node's tag had no registered forward mapping; the node and its
    /// entire subtree were excluded from the output.
    UnsupportedTag { tag: String },
    /// The number of open markers did not match the number of close markers
    /// after traversal.
    UnbalancedStructure { open: usize, close: usize },
    /// An event's compact code had no registered backward mapping; the
    /// event was excluded from the emitted markup.
    UnknownCode { code: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnsupportedTag { tag } => write!(f, "unsupported tag: {tag}"),
            Warning::UnbalancedStructure { open, close } => {
                write!(
                    f,
                    "unbalanced structure: {open} open markers, {close} close markers"
                )
            }
            Warning::UnknownCode { code } => write!(f, "unknown tag code: {code}"),
        }
    }
}
