//! Entries: type-erased (key, value) pairs.
//!
//! Stores hold entries without knowing their value types. Reading a value
//! back goes through a typed [`Key`] and a checked downcast, so a key of the
//! wrong type produces [`CoreError::TypeMismatch`] instead of a bad cast.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{CoreError, Result};
use crate::id::ExtrasId;
use crate::key::Key;

/// Object-safe view of a [`TypedEntry`].
trait ErasedEntry: Send + Sync {
    fn id(&self) -> ExtrasId;
    fn type_name(&self) -> &'static str;
    fn value_any(&self) -> Arc<dyn Any + Send + Sync>;
    fn serialize(&self) -> Option<Result<Vec<u8>>>;
}

struct TypedEntry<T> {
    key: Key<T>,
    value: Arc<T>,
}

impl<T> ErasedEntry for TypedEntry<T>
where
    T: Send + Sync + 'static,
{
    fn id(&self) -> ExtrasId {
        self.key.id()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn value_any(&self) -> Arc<dyn Any + Send + Sync> {
        self.value.clone()
    }

    fn serialize(&self) -> Option<Result<Vec<u8>>> {
        let serializer = self.key.serializer()?;
        Some(serializer.serialize(&self.key, &self.value))
    }
}

/// A value together with the key it was stored under.
#[derive(Clone)]
pub struct Entry {
    inner: Arc<dyn ErasedEntry>,
}

impl Entry {
    /// Create an entry from a key and an owned value.
    pub fn new<T>(key: Key<T>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self::from_arc(key, Arc::new(value))
    }

    /// Create an entry from a key and a shared value.
    pub fn from_arc<T>(key: Key<T>, value: Arc<T>) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(TypedEntry { key, value }),
        }
    }

    /// The identity of the entry.
    pub fn id(&self) -> ExtrasId {
        self.inner.id()
    }

    /// Name of the stored value's type.
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }

    /// Read the value through `key`.
    ///
    /// Returns `Ok(None)` if `key` addresses a different identity, and
    /// [`CoreError::TypeMismatch`] if the identity matches but the value type
    /// does not.
    pub fn value<T>(&self, key: &Key<T>) -> Result<Option<Arc<T>>>
    where
        T: Send + Sync + 'static,
    {
        if key.id() != self.id() {
            return Ok(None);
        }
        match self.inner.value_any().downcast::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(CoreError::TypeMismatch {
                id: self.id(),
                expected: std::any::type_name::<T>(),
                found: self.type_name(),
            }),
        }
    }

    /// Encode the value with the serializer of the key it was stored under.
    ///
    /// `None` if that key carries no serializer capability.
    pub fn serialize(&self) -> Option<Result<Vec<u8>>> {
        self.inner.serialize()
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id())
            .field("type", &self.type_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::CborSerializer;

    #[test]
    fn test_value_through_matching_key() {
        let key = Key::<String>::named("name");
        let entry = Entry::new(key.clone(), "core".to_string());
        assert_eq!(entry.value(&key).unwrap().as_deref(), Some(&"core".to_string()));
    }

    #[test]
    fn test_shared_value_is_not_copied() {
        let key = Key::<Vec<String>>::named("platforms");
        let shared = Arc::new(vec!["jvm".to_string()]);
        let entry = Entry::from_arc(key.clone(), Arc::clone(&shared));

        let read = entry.value(&key).unwrap().unwrap();
        assert!(Arc::ptr_eq(&read, &shared));
    }

    #[test]
    fn test_value_through_other_identity_is_none() {
        let entry = Entry::new(Key::<String>::named("a"), "x".to_string());
        assert!(entry.value(&Key::<String>::named("b")).unwrap().is_none());
    }

    #[test]
    fn test_type_mismatch_is_explicit() {
        let entry = Entry::new(Key::<String>::named("shared"), "x".to_string());
        let err = entry.value(&Key::<u64>::named("shared")).unwrap_err();
        match err {
            CoreError::TypeMismatch { expected, found, .. } => {
                assert_eq!(expected, "u64");
                assert!(found.contains("String"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_serialize_requires_capability() {
        let plain = Entry::new(Key::<u32>::named("n"), 7);
        assert!(plain.serialize().is_none());

        let key = Key::<u32>::named("n").with_serializer(CborSerializer);
        let bytes = Entry::new(key.clone(), 7).serialize().unwrap().unwrap();
        assert_eq!(key.serializer().unwrap().deserialize(&key, &bytes), Some(7));
    }
}
