//! Error types for extras core primitives.

use thiserror::Error;

use crate::id::ExtrasId;

/// Core errors raised by keys, entries and serializers.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A value could not be encoded by its serializer.
    #[error("encoding error for {id}: {message}")]
    Encoding { id: ExtrasId, message: String },

    /// A stored value was read through a key of a different value type.
    #[error("type mismatch for {id}: expected {expected}, found {found}")]
    TypeMismatch {
        id: ExtrasId,
        expected: &'static str,
        found: &'static str,
    },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
