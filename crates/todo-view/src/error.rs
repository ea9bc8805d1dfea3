//! Error types for view synchronization

use thiserror::Error;
use todo_protocol::ProtocolError;

/// Result type alias for synchronizer operations
pub type SyncResult<T> = std::result::Result<T, SyncError>;

/// Errors surfaced by the view synchronizer
#[derive(Debug, Error)]
pub enum SyncError {
    /// Building or sending the operation failed
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The id is not rendered in the view
    #[error("No rendered todo with id '{0}'")]
    UnknownItem(String),
}

impl SyncError {
    /// Whether the input was rejected before any request was made
    pub fn is_validation(&self) -> bool {
        matches!(self, SyncError::Protocol(e) if e.is_validation())
    }
}
