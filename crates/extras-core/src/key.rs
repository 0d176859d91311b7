//! Typed keys: an identity plus the value type and attached capabilities.

use std::fmt;
use std::marker::PhantomData;

use crate::capability::{Capabilities, Capability};
use crate::id::ExtrasId;
use crate::serializer::{ExtrasSerializer, SerializerCapability};

/// A typed handle to a property.
///
/// Two keys with the same [`ExtrasId`] address the same stored value, even if
/// they differ in capabilities. The value type `T` is only a compile-time
/// promise; stores re-check it at read time.
pub struct Key<T> {
    id: ExtrasId,
    capabilities: Capabilities,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    /// Create a key with no capabilities.
    pub fn new(id: ExtrasId) -> Self {
        Self {
            id,
            capabilities: Capabilities::new(),
            _marker: PhantomData,
        }
    }

    /// Create a key whose identity is derived from `name`.
    pub fn named(name: &str) -> Self {
        Self::new(ExtrasId::derive(name))
    }

    /// The identity this key addresses.
    pub fn id(&self) -> ExtrasId {
        self.id
    }

    /// All capabilities attached to this key.
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Attach a capability, replacing any of the same kind.
    pub fn with_capability<C: Capability>(self, capability: C) -> Self {
        Self {
            capabilities: self.capabilities.with(capability),
            ..self
        }
    }

    /// Look up a capability by kind.
    pub fn capability<C: Capability>(&self) -> Option<&C> {
        self.capabilities.get::<C>()
    }
}

impl<T: 'static> Key<T> {
    /// Attach a serializer, making the key able to freeze and thaw values.
    pub fn with_serializer<S>(self, serializer: S) -> Self
    where
        S: ExtrasSerializer<T> + 'static,
    {
        self.with_capability(SerializerCapability::new(serializer))
    }

    /// The serializer capability, if attached.
    pub fn serializer(&self) -> Option<&SerializerCapability<T>> {
        self.capability::<SerializerCapability<T>>()
    }
}

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            capabilities: self.capabilities.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("id", &self.id)
            .field("type", &std::any::type_name::<T>())
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::CborSerializer;

    #[test]
    fn test_named_key_identity() {
        let a = Key::<String>::named("module.name");
        let b = Key::<u32>::named("module.name");
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_serializer_is_optional() {
        let plain = Key::<String>::named("plain");
        assert!(plain.serializer().is_none());

        let serializable = plain.clone().with_serializer(CborSerializer);
        assert!(serializable.serializer().is_some());
        assert!(plain.serializer().is_none());
    }

    #[test]
    fn test_serializer_kind_is_per_value_type() {
        let key = Key::<String>::named("x").with_serializer(CborSerializer);
        assert!(key.capability::<SerializerCapability<u64>>().is_none());
    }
}
