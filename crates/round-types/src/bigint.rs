//! Lossless JSON encoding for 256-bit amounts.

use core::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Key of the single-field record that carries a 256-bit integer on the wire.
const BIGINT_TAG: &str = "__bigint__";

/// A 256-bit amount that serializes as `{"__bigint__": "<decimal>"}`.
///
/// Native JSON numbers lose precision past 2^53, so monetary fields are
/// tagged as a single-key record holding the decimal string instead.
/// Deserialization accepts only that exact shape.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaggedU256(pub U256);

impl TaggedU256 {
    /// The zero amount.
    pub const ZERO: Self = Self(U256::ZERO);
}

impl From<U256> for TaggedU256 {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<u64> for TaggedU256 {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl fmt::Display for TaggedU256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct BigIntRecord {
    #[serde(rename = "__bigint__")]
    value: String,
}

impl Serialize for TaggedU256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        BigIntRecord {
            value: self.0.to_string(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TaggedU256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = BigIntRecord::deserialize(deserializer)?;
        let value = U256::from_str_radix(&record.value, 10).map_err(|e| {
            serde::de::Error::custom(format!("invalid {BIGINT_TAG} value {:?}: {e}", record.value))
        })?;
        Ok(Self(value))
    }
}
