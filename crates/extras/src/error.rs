//! Error types for the facade.

use extras_store::StoreError;
use thiserror::Error;

/// Errors that can occur when freezing, encoding, or decoding extras.
///
/// Core errors arrive wrapped in [`StoreError::Core`] or
/// [`StoreError::Serialize`].
#[derive(Debug, Error)]
pub enum ExtrasError {
    /// Store or codec error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, ExtrasError>;
