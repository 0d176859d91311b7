//! # Extras Core
//!
//! Pure primitives for extras stores: identities, typed keys, capabilities,
//! and type-erased entries.
//!
//! This crate contains no storage and no locking. It defines what a property
//! is called ([`ExtrasId`]), how it is addressed with a type ([`Key`]), and
//! which behaviors a key carries ([`Capabilities`]).
//!
//! ## Key Types
//!
//! - [`ExtrasId`] - Opaque identity, stable across the serialization boundary
//! - [`Key`] - Typed handle: identity + value type + capabilities
//! - [`Capabilities`] - Heterogeneous registry looked up by capability kind
//! - [`ExtrasSerializer`] - The capability that lets a key freeze and thaw values
//! - [`Entry`] - Type-erased (key, value) pair with a checked downcast
//!
//! ## Usage
//!
//! ```rust
//! use extras_core::{CborSerializer, Entry, Key};
//!
//! let key = Key::<String>::named("module.name").with_serializer(CborSerializer);
//! let entry = Entry::new(key.clone(), "core".to_string());
//!
//! assert_eq!(entry.value(&key).unwrap().as_deref(), Some(&"core".to_string()));
//! assert!(entry.serialize().is_some());
//! ```

pub mod capability;
pub mod entry;
pub mod error;
pub mod id;
pub mod key;
pub mod serializer;

pub use capability::{Capabilities, Capability};
pub use entry::Entry;
pub use error::{CoreError, Result};
pub use id::ExtrasId;
pub use key::Key;
pub use serializer::{CborSerializer, ExtrasSerializer, JsonSerializer, SerializerCapability};
