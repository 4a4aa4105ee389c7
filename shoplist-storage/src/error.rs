//! Error types for the local list store.

use shoplist_types::ErrorKind;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur against the local [`crate::ShoppingListManager`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// Operation targeted a `list_id` with no local `ShoppingList`.
    #[error("list {0} does not exist")]
    NotFound(String),

    /// Creation targeted a `list_id` that is already active.
    #[error("list {0} already exists")]
    AlreadyExists(String),

    /// Write targeted a `list_id` that has been tombstoned.
    #[error("list {0} was deleted")]
    Tombstoned(String),

    /// Snapshot/restore failed to read or parse the JSON file.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl StorageError {
    /// Classifies this error under the cluster-wide error taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::NotFound(_) => ErrorKind::NotFound,
            StorageError::AlreadyExists(_) | StorageError::Tombstoned(_) => ErrorKind::Conflict,
            StorageError::Snapshot(_) => ErrorKind::Internal,
        }
    }
}
