//! Freeze/thaw: converting stores to and from the payload-map wire form.
//!
//! A payload map keeps no type information. Types are re-established only
//! when a key with a matching serializer reads a thawed value back.

use std::collections::BTreeMap;

use bytes::Bytes;
use extras_core::{Entry, ExtrasId};

use crate::error::{Result, StoreError};
use crate::lazy::LazyExtras;
use crate::traits::Extras;

/// Raw payloads keyed by identity.
pub type PayloadMap = BTreeMap<ExtrasId, Bytes>;

/// Freeze any store into its payload map.
///
/// This is the single lossy point: entries whose key had no serializer
/// attached are silently omitted, so `thaw(freeze(store))` may hold fewer
/// identities than `store`.
pub fn freeze<E: Extras>(store: &E) -> Result<PayloadMap> {
    store.freeze()
}

/// Reconstruct a lazy store from a payload map.
pub fn thaw(payloads: PayloadMap) -> LazyExtras {
    LazyExtras::thaw(payloads)
}

/// Serialize every entry that carries a serializer capability.
pub fn freeze_entries(entries: &[Entry]) -> Result<PayloadMap> {
    let mut payloads = PayloadMap::new();
    for entry in entries {
        if let Some(bytes) = serialize_entry(entry)? {
            payloads.insert(entry.id(), bytes);
        }
    }
    Ok(payloads)
}

/// Serialize one entry, or `None` if its key cannot serialize.
pub(crate) fn serialize_entry(entry: &Entry) -> Result<Option<Bytes>> {
    match entry.serialize() {
        Some(Ok(bytes)) => Ok(Some(Bytes::from(bytes))),
        Some(Err(source)) => Err(StoreError::Serialize {
            id: entry.id(),
            source,
        }),
        None => {
            tracing::debug!(id = %entry.id(), ty = entry.type_name(), "entry dropped on freeze: no serializer");
            Ok(None)
        }
    }
}
