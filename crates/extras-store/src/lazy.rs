//! Lazy store: raw payloads deserialized on first access.
//!
//! Every identity lives in exactly one slot state:
//!
//! - `Untouched`: raw bytes present, no read attempted yet
//! - `Positive`: deserialized value cached, raw bytes dropped
//! - `Negative`: deserialization yielded no value, raw bytes dropped
//!
//! Transitions only go from `Untouched` to one of the settled states.
//!
//! ## Locking
//!
//! Reads of settled slots take the shared lock and never block each other.
//! The first read of an untouched slot promotes to the exclusive lock and
//! re-checks the slot before deserializing, so two racing readers settle an
//! identity exactly once.
//!
//! Deserialization runs under the exclusive lock. A serializer that blocks
//! stalls every other read of the same store until it returns, including
//! reads of identities that are already settled. The lock is not reentrant:
//! a serializer must not read from the store it is being called by, or it
//! deadlocks.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bytes::Bytes;
use extras_core::{Entry, ExtrasId, Key, SerializerCapability};

use crate::error::Result;
use crate::freeze::{serialize_entry, PayloadMap};
use crate::traits::Extras;

enum Slot {
    Untouched(Bytes),
    Positive(Entry),
    Negative,
}

impl Slot {
    /// The settled outcome, or `None` while the payload is untouched.
    fn settled(&self) -> Option<Option<Entry>> {
        match self {
            Slot::Untouched(_) => None,
            Slot::Positive(entry) => Some(Some(entry.clone())),
            Slot::Negative => Some(None),
        }
    }
}

/// Snapshot of a lazy store's slot states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LazyStats {
    pub untouched: usize,
    pub positive: usize,
    pub negative: usize,
    /// Total size of raw payloads not yet deserialized.
    pub remaining_bytes: usize,
}

/// A store thawed from a payload map.
pub struct LazyExtras {
    /// Fixed at construction; read without locking.
    ids: BTreeSet<ExtrasId>,
    slots: RwLock<HashMap<ExtrasId, Slot>>,
}

impl LazyExtras {
    /// Build a lazy store over raw payloads. Nothing is deserialized here.
    pub fn thaw(payloads: PayloadMap) -> Self {
        let ids = payloads.keys().copied().collect();
        let slots = payloads
            .into_iter()
            .map(|(id, bytes)| (id, Slot::Untouched(bytes)))
            .collect();
        Self {
            ids,
            slots: RwLock::new(slots),
        }
    }

    /// Count slots per state.
    pub fn stats(&self) -> LazyStats {
        let slots = self.read_slots();
        let mut stats = LazyStats::default();
        for slot in slots.values() {
            match slot {
                Slot::Untouched(bytes) => {
                    stats.untouched += 1;
                    stats.remaining_bytes += bytes.len();
                }
                Slot::Positive(_) => stats.positive += 1,
                Slot::Negative => stats.negative += 1,
            }
        }
        stats
    }

    // A panic inside a serializer poisons the lock after the slot has already
    // been moved to `Negative`, so the table is consistent and safe to reuse.
    fn read_slots(&self) -> RwLockReadGuard<'_, HashMap<ExtrasId, Slot>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_slots(&self) -> RwLockWriteGuard<'_, HashMap<ExtrasId, Slot>> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Settle the slot for `key` at most once and return its outcome.
    fn settle<T>(&self, key: &Key<T>, serializer: &SerializerCapability<T>) -> Option<Entry>
    where
        T: Send + Sync + 'static,
    {
        let id = key.id();

        // Fast path: already settled. The shared guard drops with this statement.
        let settled = self.read_slots().get(&id)?.settled();
        if let Some(outcome) = settled {
            tracing::trace!(%id, hit = outcome.is_some(), "settled slot read");
            return outcome;
        }

        let mut slots = self.write_slots();
        let slot = slots.get_mut(&id)?;

        // Another reader may have settled the slot while we waited.
        let bytes = match std::mem::replace(slot, Slot::Negative) {
            Slot::Untouched(bytes) => bytes,
            Slot::Positive(entry) => {
                *slot = Slot::Positive(entry.clone());
                return Some(entry);
            }
            Slot::Negative => return None,
        };

        match serializer.deserialize(key, &bytes) {
            Some(value) => {
                let entry = Entry::new(key.clone(), value);
                *slot = Slot::Positive(entry.clone());
                tracing::debug!(%id, bytes = bytes.len(), "payload settled");
                Some(entry)
            }
            None => {
                tracing::debug!(%id, bytes = bytes.len(), "payload settled without value");
                None
            }
        }
    }
}

impl Extras for LazyExtras {
    fn ids(&self) -> &BTreeSet<ExtrasId> {
        &self.ids
    }

    fn try_get<T>(&self, key: &Key<T>) -> Result<Option<Arc<T>>>
    where
        T: Send + Sync + 'static,
    {
        if !self.ids.contains(&key.id()) {
            return Ok(None);
        }

        // A key without a serializer has no access, whether or not bytes exist.
        let Some(serializer) = key.serializer() else {
            return Ok(None);
        };

        match self.settle(key, serializer) {
            Some(entry) => Ok(entry.value(key)?),
            None => Ok(None),
        }
    }

    /// Snapshot every identity that still has a value: untouched payloads as
    /// they are, positive slots re-serialized. Negative slots are gone.
    fn freeze(&self) -> Result<PayloadMap> {
        let slots = self.write_slots();
        let mut payloads = PayloadMap::new();
        for (id, slot) in slots.iter() {
            match slot {
                Slot::Untouched(bytes) => {
                    payloads.insert(*id, bytes.clone());
                }
                Slot::Positive(entry) => {
                    if let Some(bytes) = serialize_entry(entry)? {
                        payloads.insert(*id, bytes);
                    }
                }
                Slot::Negative => {}
            }
        }
        Ok(payloads)
    }
}

impl fmt::Debug for LazyExtras {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyExtras")
            .field("ids", &self.ids.len())
            .field("stats", &self.stats())
            .finish()
    }
}
