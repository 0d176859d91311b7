//! Eager store: fully materialized entries built from in-process values.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use extras_core::{Entry, ExtrasId, Key};

use crate::error::Result;
use crate::freeze::{freeze_entries, PayloadMap};
use crate::traits::{Extras, IterableExtras};

/// An immutable store over typed values that never need deserializing.
#[derive(Debug, Clone)]
pub struct EagerExtras {
    ids: BTreeSet<ExtrasId>,
    /// Sorted by identity, one entry per identity.
    entries: Vec<Entry>,
}

impl EagerExtras {
    /// Start building a store.
    pub fn builder() -> EagerExtrasBuilder {
        EagerExtrasBuilder::default()
    }

    /// Build a store from entries. A later entry replaces an earlier one
    /// with the same identity.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut builder = Self::builder();
        for entry in entries {
            builder = builder.entry(entry);
        }
        builder.build()
    }

    fn lookup(&self, id: &ExtrasId) -> Option<&Entry> {
        self.entries
            .binary_search_by(|entry| entry.id().cmp(id))
            .ok()
            .map(|index| &self.entries[index])
    }
}

impl Extras for EagerExtras {
    fn ids(&self) -> &BTreeSet<ExtrasId> {
        &self.ids
    }

    fn try_get<T>(&self, key: &Key<T>) -> Result<Option<Arc<T>>>
    where
        T: Send + Sync + 'static,
    {
        match self.lookup(&key.id()) {
            Some(entry) => Ok(entry.value(key)?),
            None => Ok(None),
        }
    }

    fn freeze(&self) -> Result<PayloadMap> {
        freeze_entries(&self.entries)
    }
}

impl IterableExtras for EagerExtras {
    fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

/// Builder for [`EagerExtras`].
#[derive(Debug, Default)]
pub struct EagerExtrasBuilder {
    entries: BTreeMap<ExtrasId, Entry>,
}

impl EagerExtrasBuilder {
    /// Store `value` under `key`, replacing any value with the same identity.
    pub fn insert<T>(self, key: Key<T>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        self.entry(Entry::new(key, value))
    }

    /// Add a prebuilt entry, replacing any entry with the same identity.
    pub fn entry(mut self, entry: Entry) -> Self {
        self.entries.insert(entry.id(), entry);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn build(self) -> EagerExtras {
        EagerExtras {
            ids: self.entries.keys().copied().collect(),
            entries: self.entries.into_values().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use extras_core::{CborSerializer, CoreError};

    #[test]
    fn test_get_by_key() {
        let name = Key::<String>::named("name");
        let count = Key::<u64>::named("count");
        let store = EagerExtras::builder()
            .insert(name.clone(), "core".to_string())
            .insert(count.clone(), 3)
            .build();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&name).as_deref(), Some(&"core".to_string()));
        assert_eq!(store.get(&count).as_deref(), Some(&3));
        assert!(store.get(&Key::<u64>::named("missing")).is_none());
    }

    #[test]
    fn test_later_insert_replaces() {
        let key = Key::<u32>::named("n");
        let store = EagerExtras::builder()
            .insert(key.clone(), 1)
            .insert(key.clone(), 2)
            .build();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&key).as_deref(), Some(&2));
    }

    #[test]
    fn test_entries_sorted_by_id() {
        let store = EagerExtras::from_entries(
            ["c", "a", "b"]
                .iter()
                .map(|name| Entry::new(Key::<String>::named(name), name.to_string())),
        );
        let ids: Vec<ExtrasId> = store.entries().iter().map(Entry::id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(store.ids().iter().copied().collect::<Vec<_>>(), sorted);
    }

    #[test]
    fn test_wrong_type_is_reported_by_try_get() {
        let store = EagerExtras::builder()
            .insert(Key::<String>::named("shared"), "x".to_string())
            .build();
        let wrong = Key::<u64>::named("shared");

        assert!(matches!(
            store.try_get(&wrong),
            Err(StoreError::Core(CoreError::TypeMismatch { .. }))
        ));
        assert!(store.get(&wrong).is_none());
    }

    #[test]
    fn test_freeze_keeps_only_serializable() {
        let kept = Key::<String>::named("kept").with_serializer(CborSerializer);
        let dropped = Key::<String>::named("dropped");
        let store = EagerExtras::builder()
            .insert(kept.clone(), "a".to_string())
            .insert(dropped.clone(), "b".to_string())
            .build();

        let payloads = store.freeze().unwrap();
        assert_eq!(payloads.len(), 1);
        assert!(payloads.contains_key(&kept.id()));
        assert!(!payloads.contains_key(&dropped.id()));
    }
}
