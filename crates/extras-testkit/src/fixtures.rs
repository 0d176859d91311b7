//! Test fixtures and helpers.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use extras_core::{CborSerializer, ExtrasId, Key};
use extras_store::PayloadMap;

use crate::serializers::{CallCounter, CountingSerializer};

/// A key named `name` with a call-counting CBOR serializer.
pub fn counting_key<T>(name: &str) -> (Key<T>, CallCounter)
where
    T: Serialize + DeserializeOwned + 'static,
{
    let (serializer, counter) = CountingSerializer::new(CborSerializer);
    (Key::named(name).with_serializer(serializer), counter)
}

/// Encode `value` with the serializer attached to `key`.
///
/// # Panics
/// If `key` has no serializer or encoding fails.
pub fn encode<T: 'static>(key: &Key<T>, value: &T) -> (ExtrasId, Bytes) {
    let serializer = key.serializer().expect("fixture key needs a serializer");
    let bytes = serializer.serialize(key, value).expect("fixture value encodes");
    (key.id(), Bytes::from(bytes))
}

/// Build a payload map from typed values of one type.
pub fn payloads<'a, T, I>(values: I) -> PayloadMap
where
    T: 'static,
    I: IntoIterator<Item = (&'a Key<T>, T)>,
{
    values
        .into_iter()
        .map(|(key, value)| encode(key, &value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use extras_store::{thaw, Extras};

    #[test]
    fn test_encode_requires_nothing_but_a_serializer() {
        let (key, counter) = counting_key::<u64>("n");
        let (id, bytes) = encode(&key, &9);
        assert_eq!(id, key.id());
        assert!(!bytes.is_empty());
        assert_eq!(counter.serializations(), 1);
        assert_eq!(counter.deserializations(), 0);
    }

    #[test]
    fn test_payloads_thaw() {
        let (a, _) = counting_key::<String>("a");
        let (b, _) = counting_key::<String>("b");
        let store = thaw(payloads([(&a, "x".to_string()), (&b, "y".to_string())]));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&b).as_deref(), Some(&"y".to_string()));
    }
}
