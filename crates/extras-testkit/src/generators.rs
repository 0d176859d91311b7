//! Proptest generators for property-based testing.

use bytes::Bytes;
use proptest::prelude::*;

use extras_core::{CborSerializer, Entry, ExtrasId, JsonSerializer, Key};
use extras_store::{EagerExtras, PayloadMap};

/// Generate a property name.
pub fn property_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9.]{0,23}".prop_map(String::from)
}

/// Generate a random identity.
pub fn extras_id() -> impl Strategy<Value = ExtrasId> {
    any::<[u8; 32]>().prop_map(ExtrasId::from_bytes)
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a payload map of arbitrary bytes.
pub fn payload_map(max_entries: usize, max_len: usize) -> impl Strategy<Value = PayloadMap> {
    prop::collection::btree_map(extras_id(), payload(max_len), 0..=max_entries).prop_map(|map| {
        map.into_iter()
            .map(|(id, bytes)| (id, Bytes::from(bytes)))
            .collect::<PayloadMap>()
    })
}

/// A value stored by a generated property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Number(i64),
    Flags(Vec<bool>),
}

/// How a generated property's key serializes, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    None,
    Cbor,
    Json,
}

/// One generated property: a uniquely named value and its key's serializer.
#[derive(Debug, Clone)]
pub struct PropertySpec {
    pub name: String,
    pub value: PropertyValue,
    pub format: Format,
}

impl PropertySpec {
    pub fn id(&self) -> ExtrasId {
        ExtrasId::derive(&self.name)
    }

    pub fn is_serializable(&self) -> bool {
        self.format != Format::None
    }

    /// A key of type `T` for this property, with the serializer its format names.
    pub fn key<T>(&self) -> Key<T>
    where
        T: serde::Serialize + serde::de::DeserializeOwned + 'static,
    {
        let key = Key::named(&self.name);
        match self.format {
            Format::None => key,
            Format::Cbor => key.with_serializer(CborSerializer),
            Format::Json => key.with_serializer(JsonSerializer),
        }
    }

    /// The stored value as an entry under [`PropertySpec::key`].
    pub fn entry(&self) -> Entry {
        match &self.value {
            PropertyValue::Text(v) => Entry::new(self.key::<String>(), v.clone()),
            PropertyValue::Number(v) => Entry::new(self.key::<i64>(), *v),
            PropertyValue::Flags(v) => Entry::new(self.key::<Vec<bool>>(), v.clone()),
        }
    }
}

/// Generate a property value.
pub fn property_value() -> impl Strategy<Value = PropertyValue> {
    prop_oneof![
        ".{0,32}".prop_map(PropertyValue::Text),
        any::<i64>().prop_map(PropertyValue::Number),
        prop::collection::vec(any::<bool>(), 0..8).prop_map(PropertyValue::Flags),
    ]
}

/// Generate a serializer choice.
pub fn format() -> impl Strategy<Value = Format> {
    prop_oneof![Just(Format::None), Just(Format::Cbor), Just(Format::Json)]
}

/// Generate up to `max` properties with distinct names.
pub fn property_specs(max: usize) -> impl Strategy<Value = Vec<PropertySpec>> {
    prop::collection::btree_map(property_name(), (property_value(), format()), 0..=max).prop_map(
        |map| {
            map.into_iter()
                .map(|(name, (value, format))| PropertySpec { name, value, format })
                .collect::<Vec<_>>()
        },
    )
}

/// Build an eager store holding every generated property.
pub fn eager_from_specs(specs: &[PropertySpec]) -> EagerExtras {
    EagerExtras::from_entries(specs.iter().map(PropertySpec::entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use extras_store::{Extras, IterableExtras};

    proptest! {
        #[test]
        fn test_specs_have_distinct_ids(specs in property_specs(16)) {
            let store = eager_from_specs(&specs);
            prop_assert_eq!(store.len(), specs.len());
            prop_assert_eq!(store.entries().len(), specs.len());
        }

        #[test]
        fn test_spec_values_read_back(specs in property_specs(8)) {
            let store = eager_from_specs(&specs);
            for spec in &specs {
                match &spec.value {
                    PropertyValue::Text(v) => {
                        let got = store.get(&spec.key::<String>());
                        prop_assert_eq!(got.as_deref(), Some(v));
                    }
                    PropertyValue::Number(v) => {
                        let got = store.get(&spec.key::<i64>());
                        prop_assert_eq!(got.as_deref(), Some(v));
                    }
                    PropertyValue::Flags(v) => {
                        let got = store.get(&spec.key::<Vec<bool>>());
                        prop_assert_eq!(got.as_deref(), Some(v));
                    }
                }
            }
        }
    }
}
