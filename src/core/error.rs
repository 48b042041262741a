use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while editing, loading or saving a translation document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// A key path would have to pass through an existing leaf value.
    #[error("Cannot insert '{path}': '{prefix}' is already a value, not a section")]
    StructuralConflict { path: String, prefix: String },

    /// A key path with no segments was supplied.
    #[error("Key path cannot be empty")]
    EmptyKeyPath,

    /// A key path was rejected before any mutation took place.
    #[error("Invalid key path '{path}': {reason}")]
    InvalidKeyPath { path: String, reason: String },

    #[error("Failed to read file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON: {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Root of JSON file must be an object: {}", path.display())]
    RootNotObject { path: PathBuf },

    #[error("Failed to serialize JSON")]
    Serialize(#[source] serde_json::Error),

    /// The document could not be written. The destination file is untouched.
    #[error("Failed to write file: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, DocumentError::StructuralConflict { .. })
    }
}
