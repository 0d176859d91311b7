//! Canonical CBOR encoding of payload maps.
//!
//! Wire form:
//! - A single definite-length map
//! - Keys are 32-byte byte strings (identities), in ascending order
//! - Values are byte strings (raw payloads)
//!
//! There is no version tag. Decoding re-encodes the parsed map and rejects
//! input that differs, so every accepted byte string has exactly one form.

use bytes::Bytes;
use ciborium::value::Value;
use extras_core::ExtrasId;

use crate::error::{Result, StoreError};
use crate::freeze::PayloadMap;

/// Limits applied when decoding untrusted payload-map bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum number of identities in one map.
    pub max_entries: usize,
    /// Maximum size of a single raw payload.
    pub max_payload_len: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_entries: 65_536,
            max_payload_len: 64 * 1024 * 1024,
        }
    }
}

impl DecodeLimits {
    /// No limits beyond available memory.
    pub fn unbounded() -> Self {
        Self {
            max_entries: usize::MAX,
            max_payload_len: usize::MAX,
        }
    }
}

/// Encode a payload map to canonical bytes.
pub fn encode_payloads(payloads: &PayloadMap) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_uint(&mut buf, 5, payloads.len() as u64);
    // Every key encodes with the same 2-byte header, so identity order is
    // encoded-byte order.
    for (id, bytes) in payloads {
        encode_bytes(&mut buf, id.as_bytes());
        encode_bytes(&mut buf, bytes);
    }
    buf
}

/// Decode canonical payload-map bytes.
pub fn decode_payloads(bytes: &[u8], limits: &DecodeLimits) -> Result<PayloadMap> {
    let value: Value =
        ciborium::from_reader(bytes).map_err(|e| StoreError::Codec(e.to_string()))?;

    let entries = match value {
        Value::Map(entries) => entries,
        _ => return Err(StoreError::Codec("expected map".into())),
    };

    if entries.len() > limits.max_entries {
        return Err(StoreError::LimitExceeded(format!(
            "{} entries, limit {}",
            entries.len(),
            limits.max_entries
        )));
    }

    let mut payloads = PayloadMap::new();
    for (key, value) in entries {
        let id = match key {
            Value::Bytes(b) => ExtrasId::try_from(b.as_slice())
                .map_err(|_| StoreError::Codec(format!("identity of {} bytes", b.len())))?,
            _ => return Err(StoreError::Codec("identity is not a byte string".into())),
        };

        let payload = match value {
            Value::Bytes(b) => b,
            _ => return Err(StoreError::Codec(format!("payload for {id} is not a byte string"))),
        };

        if payload.len() > limits.max_payload_len {
            return Err(StoreError::LimitExceeded(format!(
                "payload for {id} is {} bytes, limit {}",
                payload.len(),
                limits.max_payload_len
            )));
        }

        if payloads.insert(id, Bytes::from(payload)).is_some() {
            return Err(StoreError::Codec(format!("duplicate identity {id}")));
        }
    }

    // Catches unsorted keys, non-minimal lengths, and trailing bytes.
    if encode_payloads(&payloads) != bytes {
        return Err(StoreError::Codec("non-canonical encoding".into()));
    }

    Ok(payloads)
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffffffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}
