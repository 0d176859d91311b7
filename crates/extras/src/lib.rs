//! # Extras
//!
//! Typed, lazily-deserializing, concurrency-safe property stores.
//!
//! ## Overview
//!
//! An extras store is a heterogeneous key-value container addressed by typed
//! [`Key`]s. It can be frozen into a payload map of raw bytes, carried across
//! a process or version boundary, and thawed on the other side into a store
//! that only deserializes a value when someone asks for it.
//!
//! ## Key Concepts
//!
//! - **Identity**: [`ExtrasId`], the stable name of a property
//! - **Capability**: behavior attached to a key; a [`SerializerCapability`]
//!   is what lets a key freeze and thaw values
//! - **Settlement**: the one-way move of a lazy identity from raw bytes to a
//!   cached value or a cached absence
//! - **Freeze/Thaw**: the lossy round trip through a [`PayloadMap`]
//!
//! ## Usage
//!
//! ```rust
//! use extras::{AnyExtras, CborSerializer, DecodeLimits, Entry, Extras, Key};
//!
//! let name = Key::<String>::named("module.name").with_serializer(CborSerializer);
//! let local = Key::<u32>::named("module.local");
//!
//! let producer = AnyExtras::from_entries([
//!     Entry::new(name.clone(), "core".to_string()),
//!     Entry::new(local.clone(), 7),
//! ]);
//!
//! let bytes = producer.to_bytes().unwrap();
//! let consumer = AnyExtras::from_bytes(&bytes, &DecodeLimits::default()).unwrap();
//!
//! assert_eq!(consumer.get(&name).as_deref(), Some(&"core".to_string()));
//! // `local` had no serializer, so it did not survive the boundary.
//! assert!(consumer.get(&local).is_none());
//! ```
//!
//! ## Re-exports
//!
//! - `extras::core` - Identities, keys, capabilities, entries
//! - `extras::store` - Store variants, freeze/thaw, wire codec

pub mod any;
pub mod error;

pub use extras_core as core;
pub use extras_store as store;

pub use any::AnyExtras;
pub use error::{ExtrasError, Result};

pub use extras_core::{
    Capabilities, Capability, CborSerializer, CoreError, Entry, ExtrasId, ExtrasSerializer,
    JsonSerializer, Key, SerializerCapability,
};
pub use extras_store::{
    decode_payloads, encode_payloads, freeze, freeze_entries, thaw, DecodeLimits, EagerExtras,
    EagerExtrasBuilder, EmptyExtras, Extras, IterableExtras, LazyExtras, LazyStats, PayloadMap,
    StoreError, EMPTY,
};
