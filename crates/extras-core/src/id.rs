//! Identity: the opaque token naming a logical property.
//!
//! An identity is the join key between a typed [`Key`](crate::Key) and a raw
//! payload. It carries no value type, so it survives the freeze/thaw boundary
//! unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte extras identifier.
///
/// Derived from Blake3("extras-id-v0:" || name). A producer and a consumer
/// that derive from the same name obtain equal identities.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExtrasId(pub [u8; 32]);

impl ExtrasId {
    /// Length of an identity in bytes.
    pub const LEN: usize = 32;

    /// Derive an identity from a property name.
    pub fn derive(name: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"extras-id-v0:");
        hasher.update(name.as_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != Self::LEN {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for ExtrasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExtrasId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for ExtrasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for ExtrasId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for ExtrasId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for ExtrasId {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 32] = slice.try_into()?;
        Ok(Self(arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_derive_is_stable() {
        assert_eq!(ExtrasId::derive("module.sourceSet"), ExtrasId::derive("module.sourceSet"));
        assert_ne!(ExtrasId::derive("a"), ExtrasId::derive("b"));
    }

    #[test]
    fn test_hex_roundtrip() {
        let id = ExtrasId::derive("hex");
        assert_eq!(ExtrasId::from_hex(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn test_from_hex_rejects_short_input() {
        assert!(ExtrasId::from_hex("abcd").is_err());
    }

    #[test]
    fn test_display_is_prefix() {
        let id = ExtrasId::from_bytes([0xab; 32]);
        assert_eq!(format!("{}", id), "abababababababab");
        assert!(format!("{:?}", id).starts_with("ExtrasId("));
    }

    proptest! {
        #[test]
        fn test_distinct_names_yield_distinct_ids(a in "[a-z.]{1,24}", b in "[a-z.]{1,24}") {
            prop_assume!(a != b);
            prop_assert_ne!(ExtrasId::derive(&a), ExtrasId::derive(&b));
        }
    }
}
