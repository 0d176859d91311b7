//! # Extras Store
//!
//! Heterogeneous property stores that survive a serialization boundary.
//!
//! ## Overview
//!
//! Three store variants share the [`Extras`] read contract:
//!
//! - [`EmptyExtras`] - The zero-entry singleton ([`EMPTY`])
//! - [`EagerExtras`] - Fully materialized values built in-process
//! - [`LazyExtras`] - Raw payloads deserialized on first access and cached
//!
//! A producer builds an eager store, [`freeze`]s it into a [`PayloadMap`],
//! ships the map (optionally as bytes via [`encode_payloads`]), and the
//! consumer [`thaw`]s it into a lazy store.
//!
//! ## Usage
//!
//! ```rust
//! use extras_core::{CborSerializer, Key};
//! use extras_store::{freeze, thaw, EagerExtras, Extras};
//!
//! let name = Key::<String>::named("module.name").with_serializer(CborSerializer);
//! let store = EagerExtras::builder()
//!     .insert(name.clone(), "core".to_string())
//!     .build();
//!
//! let lazy = thaw(freeze(&store).unwrap());
//! assert_eq!(lazy.get(&name).as_deref(), Some(&"core".to_string()));
//! ```
//!
//! ## Design Notes
//!
//! - **Lossy freeze**: entries whose key has no serializer are dropped
//! - **Access control**: a key without a serializer never reads a lazy value
//! - **Settle once**: each lazy identity is deserialized at most once
//! - **No errors on read**: `get` degrades every failure to `None`

pub mod codec;
pub mod eager;
pub mod empty;
pub mod error;
pub mod freeze;
pub mod lazy;
pub mod traits;

pub use codec::{decode_payloads, encode_payloads, DecodeLimits};
pub use eager::{EagerExtras, EagerExtrasBuilder};
pub use empty::{EmptyExtras, EMPTY};
pub use error::{Result, StoreError};
pub use freeze::{freeze, freeze_entries, thaw, PayloadMap};
pub use lazy::{LazyExtras, LazyStats};
pub use traits::{Extras, IterableExtras};
