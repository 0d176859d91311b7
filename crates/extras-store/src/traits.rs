//! The read contract shared by every extras store.

use std::collections::BTreeSet;
use std::sync::Arc;

use extras_core::{Entry, ExtrasId, Key};

use crate::error::Result;
use crate::freeze::PayloadMap;

/// A read-only heterogeneous property store.
///
/// # Design Notes
///
/// - **No errors on `get`**: unknown identities, keys without the needed
///   capability, and payloads that fail to deserialize all read as `None`.
/// - **Checked types**: a value stored under one type and read through a key
///   of another is reported by `try_get` as a type mismatch.
/// - **Stable ids**: `ids()` never changes over the life of a store.
pub trait Extras: Send + Sync {
    /// Identities present in this store.
    fn ids(&self) -> &BTreeSet<ExtrasId>;

    /// Read the value for `key`, reporting a type mismatch as an error.
    fn try_get<T>(&self, key: &Key<T>) -> Result<Option<Arc<T>>>
    where
        T: Send + Sync + 'static;

    /// Convert the store into its boundary-safe payload form.
    ///
    /// Lossy: entries whose key carries no serializer are omitted.
    fn freeze(&self) -> Result<PayloadMap>;

    /// Read the value for `key`. Every failure mode degrades to `None`.
    fn get<T>(&self, key: &Key<T>) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(id = %key.id(), error = %e, "extras read degraded to no value");
                None
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    fn len(&self) -> usize {
        self.ids().len()
    }

    fn contains(&self, id: &ExtrasId) -> bool {
        self.ids().contains(id)
    }
}

/// A store whose values are fully materialized and can be enumerated.
///
/// The lazy store does not implement this: enumerating would force every
/// payload to deserialize.
pub trait IterableExtras: Extras {
    /// All entries, ordered by identity.
    fn entries(&self) -> &[Entry];
}
