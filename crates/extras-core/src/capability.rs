//! Capabilities: behaviors attached to a key and looked up by kind.
//!
//! The registry is keyed by the capability's Rust type, so new capability
//! kinds can be introduced without touching the stores that consult them.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Marker for types that can be attached to a [`Key`](crate::Key).
pub trait Capability: Any + Send + Sync {}

/// An immutable heterogeneous map from capability kind to instance.
///
/// Cloning is cheap: the underlying map is shared. Attaching a capability
/// produces a new registry and leaves existing clones untouched.
#[derive(Clone, Default)]
pub struct Capabilities {
    entries: Arc<HashMap<TypeId, CapabilitySlot>>,
}

#[derive(Clone)]
struct CapabilitySlot {
    name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

impl Capabilities {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a registry with `capability` attached, replacing any previous
    /// capability of the same kind.
    pub fn with<C: Capability>(&self, capability: C) -> Self {
        let mut entries = (*self.entries).clone();
        entries.insert(
            TypeId::of::<C>(),
            CapabilitySlot {
                name: std::any::type_name::<C>(),
                value: Arc::new(capability),
            },
        );
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Look up the capability of kind `C`.
    pub fn get<C: Capability>(&self) -> Option<&C> {
        self.entries
            .get(&TypeId::of::<C>())
            .and_then(|slot| slot.value.downcast_ref::<C>())
    }

    /// Whether a capability of kind `C` is attached.
    pub fn contains<C: Capability>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<C>())
    }

    /// Number of attached capabilities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no capability is attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.values().map(|slot| slot.name).collect();
        names.sort_unstable();
        f.debug_set().entries(names).finish()
    }
}
