//! Error type shared by the library modules.
//!
//! The CLI layer wraps these in `anyhow` for context; tests match on the
//! variants directly.

use std::path::PathBuf;
use std::time::Duration;

/// Errors produced while loading, transforming and writing messages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration file was found but could not be parsed.
    #[error("Failed to parse config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// An import row whose value is not a valid JSON string body.
    #[error("Illegal message on line {line}: {value}")]
    IllegalMessage { line: u64, value: String },

    /// The import table contains repeated keys.
    #[error("Duplicate messages detected: \n{}", .0.join("\n"))]
    DuplicateKeys(Vec<String>),

    /// A translation call did not settle in time.
    #[error("Translation timed out after {} ms", .0.as_millis())]
    Timeout(Duration),

    /// The translation API rejected the request or answered garbage.
    #[error("Translation failed: {0}")]
    Translation(String),

    /// The formatter could not process the content.
    #[error("Formatter failed: {0}")]
    Format(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A message file is not a JSON object.
    #[error("Invalid message file {}: {message}", path.display())]
    MessageFile { path: PathBuf, message: String },

    #[error("Failed to read TSV: {0}")]
    Tsv(#[from] csv::Error),

    #[error("Invalid ignore pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
