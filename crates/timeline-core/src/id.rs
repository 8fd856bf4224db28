//! Numeric item identifiers.
//!
//! Remote services hand out ids as decimal strings that routinely exceed the
//! integer range of an `f64` (and sometimes `i64`). `ItemId` stores them as a
//! `u128` so that boundary arithmetic is exact.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TimelineError;

/// A globally unique, monotonically sortable item id. Larger is newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ItemId(u128);

impl ItemId {
    /// Sentinel used by cursor tokens to mean "no boundary".
    pub const ZERO: ItemId = ItemId(0);

    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u128 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// The next id upward, saturating at `u128::MAX`.
    pub fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The next id downward, saturating at zero.
    pub fn predecessor(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(u128::from(value))
    }
}

impl FromStr for ItemId {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimelineError::Validation(format!(
                "Item id must be a decimal integer, got '{}'",
                s
            )));
        }
        trimmed
            .parse::<u128>()
            .map(Self)
            .map_err(|e| TimelineError::Validation(format!("Item id '{}' out of range: {}", s, e)))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Ids travel as strings on the wire.
impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct ItemIdVisitor;

impl<'de> Visitor<'de> for ItemIdVisitor {
    type Value = ItemId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal id string or an unsigned integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ItemId, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ItemId, E> {
        Ok(ItemId::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<ItemId, E> {
        Ok(ItemId(v))
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ItemIdVisitor)
    }
}
