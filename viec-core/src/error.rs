//! Error types for store and storage operations

use std::io;
use std::path::PathBuf;

use crate::model::TodoId;

/// Result alias used across the core crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures reported by [`TodoStore`](crate::TodoStore) operations.
///
/// The UI treats validation and not-found errors as "nothing happened";
/// only storage errors are worth surfacing in the log.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("todo title must not be empty")]
    EmptyTitle,

    #[error("project name must not be empty")]
    EmptyProjectName,

    #[error("todo not found: {0}")]
    NotFound(TodoId),

    #[error("project already exists: {0}")]
    ProjectExists(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to serialize {key}: {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Validation or lookup failures that the UI swallows silently
    pub fn is_permissive(&self) -> bool {
        matches!(
            self,
            Error::EmptyTitle
                | Error::EmptyProjectName
                | Error::NotFound(_)
                | Error::ProjectExists(_)
        )
    }
}

/// Failures of the key-value backend
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
