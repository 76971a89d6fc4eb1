//! Identity normalization.
//!
//! Entity references arrive in several shapes: a plain hex string, a
//! store-native [`StoreId`], or a document carrying an `id` / `_id`
//! field. Everything in the core compares identities through the single
//! canonical string form produced here.

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Number of raw bytes in a store-native identifier.
pub const STORE_ID_BYTES: usize = 12;

/// Length of the canonical lowercase-hex rendering.
pub const STORE_ID_HEX_LEN: usize = STORE_ID_BYTES * 2;

/// Store-native identifier: 12 bytes, rendered as a 24-character
/// lowercase-hex string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoreId([u8; STORE_ID_BYTES]);

impl StoreId {
    /// Parse the canonical form. Strict: exactly 24 lowercase hex chars.
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() != STORE_ID_HEX_LEN {
            return None;
        }
        if !s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return None;
        }
        let mut bytes = [0u8; STORE_ID_BYTES];
        hex::decode_to_slice(s, &mut bytes).ok()?;
        Some(Self(bytes))
    }

    /// Random identifier, for callers creating new documents.
    pub fn generate() -> Self {
        let mut bytes = [0u8; STORE_ID_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; STORE_ID_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; STORE_ID_BYTES] {
        &self.0
    }

    /// Canonical lowercase-hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for StoreId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("not a 24-char lowercase hex id: {:?}", s))
    }
}

impl Serialize for StoreId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for StoreId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        StoreId::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid store id: {:?}", s)))
    }
}

/// Canonical string form of any entity reference.
///
/// Accepted shapes: a JSON string, an object carrying `id`, an object
/// carrying `_id` (field values are normalized recursively, so a nested
/// `{"_id": {"id": "..."}}` still resolves). Anything else, including
/// JSON null, yields `None`. Total and pure: never panics.
pub fn normalize_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => {
            if let Some(id) = map.get("id") {
                return normalize_id(id);
            }
            map.get("_id").and_then(normalize_id)
        }
        _ => None,
    }
}

/// Canonical form converted into the store-native identifier type.
/// `None` when the reference does not normalize or is malformed.
pub fn to_store_id(value: &Value) -> Option<StoreId> {
    normalize_id(value).and_then(|s| StoreId::parse(&s))
}

/// Identity comparison across reference shapes. Two references are equal
/// iff both normalize and their canonical forms match.
pub fn id_equals(a: &Value, b: &Value) -> bool {
    match (normalize_id(a), normalize_id(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
