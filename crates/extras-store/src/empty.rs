//! The empty store singleton.

use std::collections::BTreeSet;
use std::sync::Arc;

use extras_core::{Entry, ExtrasId, Key};

use crate::error::Result;
use crate::freeze::PayloadMap;
use crate::traits::{Extras, IterableExtras};

static NO_IDS: BTreeSet<ExtrasId> = BTreeSet::new();

/// A store with zero entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyExtras;

/// The process-wide empty store.
pub static EMPTY: EmptyExtras = EmptyExtras;

impl Extras for EmptyExtras {
    fn ids(&self) -> &BTreeSet<ExtrasId> {
        &NO_IDS
    }

    fn try_get<T>(&self, _key: &Key<T>) -> Result<Option<Arc<T>>>
    where
        T: Send + Sync + 'static,
    {
        Ok(None)
    }

    fn freeze(&self) -> Result<PayloadMap> {
        Ok(PayloadMap::new())
    }
}

impl IterableExtras for EmptyExtras {
    fn entries(&self) -> &[Entry] {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extras_core::CborSerializer;

    #[test]
    fn test_empty_has_nothing() {
        let key = Key::<String>::named("anything").with_serializer(CborSerializer);
        assert!(EMPTY.is_empty());
        assert_eq!(EMPTY.len(), 0);
        assert!(EMPTY.get(&key).is_none());
        assert!(EMPTY.entries().is_empty());
        assert!(EMPTY.freeze().unwrap().is_empty());
    }
}
