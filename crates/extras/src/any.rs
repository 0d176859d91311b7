//! `AnyExtras`: one handle over the empty, eager and lazy variants.
//!
//! Hosts pass this around instead of a concrete store. The canonical
//! constructors fold every zero-entry store into [`AnyExtras::Empty`], so an
//! empty store frozen on one side thaws back to the same singleton.

use std::collections::BTreeSet;
use std::sync::Arc;

use extras_core::{Entry, ExtrasId, Key};
use extras_store::{
    decode_payloads, encode_payloads, DecodeLimits, EagerExtras, Extras, IterableExtras,
    LazyExtras, PayloadMap, EMPTY,
};

use crate::error::Result;

/// A store of any variant.
#[derive(Debug, Clone, Default)]
pub enum AnyExtras {
    #[default]
    Empty,
    Eager(Arc<EagerExtras>),
    Lazy(Arc<LazyExtras>),
}

impl AnyExtras {
    /// Build from in-process entries; no entries yields `Empty`.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Entry>,
    {
        Self::from_eager(EagerExtras::from_entries(entries))
    }

    /// Wrap an eager store; an empty one becomes `Empty`.
    pub fn from_eager(store: EagerExtras) -> Self {
        if store.is_empty() {
            Self::Empty
        } else {
            Self::Eager(Arc::new(store))
        }
    }

    /// Thaw a payload map; an empty map becomes `Empty`.
    pub fn thaw(payloads: PayloadMap) -> Self {
        if payloads.is_empty() {
            Self::Empty
        } else {
            Self::Lazy(Arc::new(LazyExtras::thaw(payloads)))
        }
    }

    /// Freeze and encode to canonical bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(encode_payloads(&self.freeze()?))
    }

    /// Decode canonical bytes and thaw them.
    pub fn from_bytes(bytes: &[u8], limits: &DecodeLimits) -> Result<Self> {
        let payloads = decode_payloads(bytes, limits)?;
        tracing::debug!(entries = payloads.len(), bytes = bytes.len(), "extras decoded");
        Ok(Self::thaw(payloads))
    }

    /// Entries of a materialized store; `None` for a lazy one.
    pub fn entries(&self) -> Option<&[Entry]> {
        match self {
            Self::Empty => Some(EMPTY.entries()),
            Self::Eager(store) => Some(store.entries()),
            Self::Lazy(_) => None,
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }
}

impl Extras for AnyExtras {
    fn ids(&self) -> &BTreeSet<ExtrasId> {
        match self {
            Self::Empty => EMPTY.ids(),
            Self::Eager(store) => store.ids(),
            Self::Lazy(store) => store.ids(),
        }
    }

    fn try_get<T>(&self, key: &Key<T>) -> extras_store::Result<Option<Arc<T>>>
    where
        T: Send + Sync + 'static,
    {
        match self {
            Self::Empty => EMPTY.try_get(key),
            Self::Eager(store) => store.try_get(key),
            Self::Lazy(store) => store.try_get(key),
        }
    }

    fn freeze(&self) -> extras_store::Result<PayloadMap> {
        match self {
            Self::Empty => EMPTY.freeze(),
            Self::Eager(store) => store.freeze(),
            Self::Lazy(store) => store.freeze(),
        }
    }
}

impl From<EagerExtras> for AnyExtras {
    fn from(store: EagerExtras) -> Self {
        Self::from_eager(store)
    }
}

impl From<LazyExtras> for AnyExtras {
    fn from(store: LazyExtras) -> Self {
        Self::Lazy(Arc::new(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extras_core::CborSerializer;

    #[test]
    fn test_no_entries_is_empty_variant() {
        assert!(matches!(AnyExtras::from_entries(Vec::new()), AnyExtras::Empty));
        assert!(matches!(AnyExtras::thaw(PayloadMap::new()), AnyExtras::Empty));
    }

    #[test]
    fn test_empty_freezes_back_to_empty() {
        let bytes = AnyExtras::default().to_bytes().unwrap();
        let back = AnyExtras::from_bytes(&bytes, &DecodeLimits::default()).unwrap();
        assert!(matches!(back, AnyExtras::Empty));
    }

    #[test]
    fn test_entries_only_for_materialized() {
        let key = Key::<u32>::named("n").with_serializer(CborSerializer);
        let eager = AnyExtras::from_entries([Entry::new(key.clone(), 5)]);
        assert_eq!(eager.entries().map(<[Entry]>::len), Some(1));

        let lazy = AnyExtras::thaw(eager.freeze().unwrap());
        assert!(lazy.is_lazy());
        assert!(lazy.entries().is_none());
        assert_eq!(lazy.get(&key).as_deref(), Some(&5));
    }

    #[test]
    fn test_decode_failures_surface_as_store_errors() {
        use crate::error::ExtrasError;
        use extras_store::StoreError;

        let err = AnyExtras::from_bytes(&[0x80], &DecodeLimits::default()).unwrap_err();
        assert!(matches!(err, ExtrasError::Store(StoreError::Codec(_))));

        let key = Key::<u32>::named("n").with_serializer(CborSerializer);
        let bytes = AnyExtras::from_entries([Entry::new(key, 5)]).to_bytes().unwrap();
        let none = DecodeLimits {
            max_entries: 0,
            ..DecodeLimits::default()
        };
        let err = AnyExtras::from_bytes(&bytes, &none).unwrap_err();
        assert!(matches!(err, ExtrasError::Store(StoreError::LimitExceeded(_))));
    }
}
