//! # Extras Testkit
//!
//! Testing utilities for extras stores.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Serializers**: call-counting, gated (blocking) and rejecting serializers
//!   for observing how often and when a store deserializes
//! - **Fixtures**: helpers for building payload maps from typed values
//! - **Generators**: Proptest strategies for property-based testing
//!
//! ## Counting deserializations
//!
//! ```rust
//! use extras_store::{thaw, Extras};
//! use extras_testkit::fixtures::{counting_key, payloads};
//!
//! let (key, calls) = counting_key::<String>("name");
//! let store = thaw(payloads([(&key, "core".to_string())]));
//!
//! store.get(&key);
//! store.get(&key);
//! assert_eq!(calls.deserializations(), 1);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use extras_testkit::generators::{eager_from_specs, property_specs};
//!
//! proptest! {
//!     #[test]
//!     fn freeze_keeps_serializable(specs in property_specs(8)) {
//!         let store = eager_from_specs(&specs);
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod serializers;

pub use fixtures::{counting_key, encode, payloads};
pub use generators::{
    eager_from_specs, payload_map, property_specs, Format, PropertySpec, PropertyValue,
};
pub use serializers::{gated, CallCounter, CountingSerializer, Gate, GatedSerializer, RejectingSerializer};
