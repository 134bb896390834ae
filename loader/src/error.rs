//! Error types for document loading.

use std::path::PathBuf;

use parschema_core::SchemaError;
use thiserror::Error;

/// Errors that can occur while loading schema and config documents.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document parsed but was rejected by the schema builder.
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    /// The file extension is neither YAML nor JSON.
    #[error("unsupported document format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The document cannot be represented as a parameter tree.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("unknown command '{name}' (available: {})", .available.join(", "))]
    UnknownCommand { name: String, available: Vec<String> },

    /// Two files in a command directory share a stem.
    #[error("command '{0}' is defined more than once")]
    DuplicateCommand(String),

    #[error("no command given (available: {})", .0.join(", "))]
    NoCommand(Vec<String>),
}

/// Convenience alias for results with [`LoadError`].
pub type Result<T> = std::result::Result<T, LoadError>;
