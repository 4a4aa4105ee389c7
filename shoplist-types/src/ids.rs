//! Identifier types used throughout the shopping-list cluster.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier for an item inside a shopping list's OR-Map.
///
/// Always a UUIDv4, matching the source's `str(uuid.uuid4())` convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Creates a new random item id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identifier for a shopping list.
///
/// The reference implementation uses a plain string (`str(uuid.uuid4())`) as
/// the ring-placement key, so `ListId` stays string-shaped rather than
/// wrapping a `Uuid` directly — callers are free to hand in any key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
    /// Creates a new random list id (UUIDv4 textual form).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an arbitrary string as a list id.
    #[must_use]
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the list id as a string slice (the ring hashing key).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ListId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ListId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ListId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier for a physical cluster node (e.g. `"node1"`).
///
/// Kept as a plain string rather than a numeric index because the address
/// convention in §4.5 derives a port from the node id's last digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wraps an arbitrary string as a node id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the node id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the last ASCII digit in the id, used by the default address
    /// convention (`tcp://127.0.0.1:{5000 + last_digit}`). Defaults to `0`
    /// when the id carries no digit.
    #[must_use]
    pub fn last_digit(&self) -> u16 {
        self.0
            .chars()
            .rev()
            .find_map(|c| c.to_digit(10))
            .unwrap_or(0) as u16
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_roundtrips_through_display_and_parse() {
        let id = ItemId::new();
        let parsed: ItemId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn list_id_wraps_arbitrary_strings() {
        let id = ListId::from_string("groceries-42");
        assert_eq!(id.as_str(), "groceries-42");
    }

    #[test]
    fn node_id_last_digit_extracts_trailing_digit() {
        assert_eq!(NodeId::new("node1").last_digit(), 1);
        assert_eq!(NodeId::new("node42").last_digit(), 2);
        assert_eq!(NodeId::new("proxy").last_digit(), 0);
    }

    #[test]
    fn serialization_roundtrip() {
        let id = ListId::from_string("abc");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc\"");
        let back: ListId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
