//! Error types for docstyle operations.

use thiserror::Error;

/// Errors that can occur while working with stylesheets.
///
/// Malformed CSS text is not an error: the parsers recover by truncating and
/// returning what they managed to read. These variants cover API misuse and
/// the I/O done by the command-line tool.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown table component: {0}")]
    UnknownTableComponent(String),

    #[cfg(feature = "cli")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
