//! Error types for the store module.

use extras_core::{CoreError, ExtrasId};
use thiserror::Error;

/// Errors that can occur during store operations.
///
/// Reads through [`Extras::get`](crate::Extras::get) never surface these;
/// they come from `try_get`, freezing, and the wire codec.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Error from a core primitive (e.g. a type mismatch on read).
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// A serializer failed while freezing an entry.
    #[error("failed to serialize {id}: {source}")]
    Serialize {
        id: ExtrasId,
        #[source]
        source: CoreError,
    },

    /// Malformed or non-canonical payload map bytes.
    #[error("codec error: {0}")]
    Codec(String),

    /// Payload map bytes exceed the configured decode limits.
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
