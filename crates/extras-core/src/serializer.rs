//! The serializer capability and the serializers shipped with the crate.
//!
//! A key may only freeze or thaw a value when it carries a
//! [`SerializerCapability`]. Deserialization returning `None` is a normal
//! outcome (malformed or stale bytes), never an error.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::capability::Capability;
use crate::error::{CoreError, Result};
use crate::key::Key;

/// Turns a `T` into raw bytes and back.
pub trait ExtrasSerializer<T>: Send + Sync {
    /// Encode `value` for the identity of `key`.
    fn serialize(&self, key: &Key<T>, value: &T) -> Result<Vec<u8>>;

    /// Decode `bytes`, or `None` if they do not hold a valid `T`.
    fn deserialize(&self, key: &Key<T>, bytes: &[u8]) -> Option<T>;
}

/// Capability kind under which a key's serializer is registered.
pub struct SerializerCapability<T> {
    inner: Arc<dyn ExtrasSerializer<T>>,
}

impl<T> SerializerCapability<T> {
    pub fn new<S>(serializer: S) -> Self
    where
        S: ExtrasSerializer<T> + 'static,
    {
        Self {
            inner: Arc::new(serializer),
        }
    }

    /// Wrap an already shared serializer.
    pub fn from_arc(serializer: Arc<dyn ExtrasSerializer<T>>) -> Self {
        Self { inner: serializer }
    }

    pub fn serialize(&self, key: &Key<T>, value: &T) -> Result<Vec<u8>> {
        self.inner.serialize(key, value)
    }

    pub fn deserialize(&self, key: &Key<T>, bytes: &[u8]) -> Option<T> {
        self.inner.deserialize(key, bytes)
    }
}

impl<T> Clone for SerializerCapability<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for SerializerCapability<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerializerCapability<{}>", std::any::type_name::<T>())
    }
}

impl<T: 'static> Capability for SerializerCapability<T> {}

/// CBOR serializer for any serde type.
#[derive(Debug, Clone, Copy, Default)]
pub struct CborSerializer;

impl<T> ExtrasSerializer<T> for CborSerializer
where
    T: Serialize + DeserializeOwned,
{
    fn serialize(&self, key: &Key<T>, value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf).map_err(|e| CoreError::Encoding {
            id: key.id(),
            message: e.to_string(),
        })?;
        Ok(buf)
    }

    fn deserialize(&self, key: &Key<T>, bytes: &[u8]) -> Option<T> {
        match ciborium::from_reader(bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(id = %key.id(), error = %e, "cbor payload rejected");
                None
            }
        }
    }
}

/// JSON serializer for any serde type.
///
/// Larger than CBOR on the wire, but readable when payloads are inspected
/// by hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl<T> ExtrasSerializer<T> for JsonSerializer
where
    T: Serialize + DeserializeOwned,
{
    fn serialize(&self, key: &Key<T>, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| CoreError::Encoding {
            id: key.id(),
            message: e.to_string(),
        })
    }

    fn deserialize(&self, key: &Key<T>, bytes: &[u8]) -> Option<T> {
        match serde_json::from_slice(bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(id = %key.id(), error = %e, "json payload rejected");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Target {
        name: String,
        platforms: Vec<String>,
    }

    fn target() -> Target {
        Target {
            name: "jvm".into(),
            platforms: vec!["jvm".into(), "android".into()],
        }
    }

    #[test]
    fn test_cbor_roundtrip() {
        let key = Key::<Target>::named("target").with_serializer(CborSerializer);
        let bytes = CborSerializer.serialize(&key, &target()).unwrap();
        assert_eq!(CborSerializer.deserialize(&key, &bytes), Some(target()));
    }

    #[test]
    fn test_json_roundtrip() {
        let key = Key::<Target>::named("target");
        let bytes = JsonSerializer.serialize(&key, &target()).unwrap();
        assert!(std::str::from_utf8(&bytes).unwrap().contains("android"));
        assert_eq!(JsonSerializer.deserialize(&key, &bytes), Some(target()));
    }

    #[test]
    fn test_one_serializer_shared_by_many_keys() {
        let shared: Arc<dyn ExtrasSerializer<u64>> = Arc::new(CborSerializer);
        let a = Key::<u64>::named("a")
            .with_capability(SerializerCapability::from_arc(Arc::clone(&shared)));
        let b = Key::<u64>::named("b")
            .with_capability(SerializerCapability::from_arc(Arc::clone(&shared)));
        assert_eq!(Arc::strong_count(&shared), 3);

        let bytes = a.serializer().unwrap().serialize(&a, &9).unwrap();
        assert_eq!(b.serializer().unwrap().deserialize(&b, &bytes), Some(9));
    }

    #[test]
    fn test_malformed_bytes_yield_none() {
        let key = Key::<Target>::named("target");
        assert_eq!(CborSerializer.deserialize(&key, &[0xff, 0x00]), None);
        assert_eq!(JsonSerializer.deserialize(&key, b"{not json"), None);
    }

    #[test]
    fn test_stale_shape_yields_none() {
        let key = Key::<u64>::named("count");
        let other = Key::<String>::named("count");
        let bytes = CborSerializer.serialize(&other, &"text".to_string()).unwrap();
        assert_eq!(CborSerializer.deserialize(&key, &bytes), None);
    }
}
