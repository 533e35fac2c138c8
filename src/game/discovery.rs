//! Discovery set: every (breed, level) ever produced
//!
//! Persisted as `{"corgi_1": true, ...}`. Entries are never removed.

use std::collections::BTreeSet;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Format a discovery key (`"{breed}_{level}"`)
pub fn discovery_key(breed: &str, level: u8) -> String {
    format!("{}_{}", breed, level)
}

/// Split a discovery key on its last underscore
pub fn parse_discovery_key(key: &str) -> Option<(&str, u8)> {
    let (breed, level) = key.rsplit_once('_')?;
    if breed.is_empty() {
        return None;
    }
    let level: u8 = level.parse().ok()?;
    Some((breed, level))
}

/// Grow-only set of discovered (breed, level) pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverySet {
    entries: BTreeSet<(String, u8)>,
}

impl DiscoverySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pair. Returns true if it was not known before.
    pub fn record(&mut self, breed: &str, level: u8) -> bool {
        self.entries.insert((breed.to_string(), level))
    }

    pub fn contains(&self, breed: &str, level: u8) -> bool {
        self.entries.contains(&(breed.to_string(), level))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        parse_discovery_key(key)
            .map(|(b, l)| self.contains(b, l))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in (breed, level) order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.entries.iter().map(|(b, l)| (b.as_str(), *l))
    }

    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.iter().map(|(b, l)| discovery_key(b, l))
    }
}

impl Serialize for DiscoverySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for key in self.keys() {
            map.serialize_entry(&key, &true)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DiscoverySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DiscoveryVisitor)
    }
}

/// Accepts the object form (`{"key": true}`) or a plain array of keys.
/// Malformed keys and falsy values are skipped.
struct DiscoveryVisitor;

impl<'de> Visitor<'de> for DiscoveryVisitor {
    type Value = DiscoverySet;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("a map of discovery keys to booleans, or an array of keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = DiscoverySet::new();
        while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
            let truthy = match value {
                serde_json::Value::Bool(b) => b,
                serde_json::Value::Null => false,
                _ => true,
            };
            if !truthy {
                continue;
            }
            if let Some((breed, level)) = parse_discovery_key(&key) {
                set.record(breed, level);
            }
        }
        Ok(set)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = DiscoverySet::new();
        while let Some(key) = access.next_element::<String>()? {
            if let Some((breed, level)) = parse_discovery_key(&key) {
                set.record(breed, level);
            }
        }
        Ok(set)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(DiscoverySet::new())
    }
}
