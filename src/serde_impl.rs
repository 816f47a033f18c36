//! Serde support for [`Registry`].
//!
//! A registry serializes as an ordered identifier-to-value map. Handles are
//! never written out; deserializing re-adds every entry, minting fresh handles.

use std::fmt;
use std::marker::PhantomData;
use std::mem;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::RegistryConfig;
use crate::registry::Registry;

/// Upper bound, in bytes, on what an input's size hint may preallocate.
const MAX_PREALLOC_BYTES: usize = 1024 * 1024;

/// Clamps a deserializer-reported entry count so a lying length prefix
/// cannot force a huge up-front allocation.
fn cautious_capacity<V>(hint: Option<usize>) -> usize {
    let max = MAX_PREALLOC_BYTES / mem::size_of::<(String, V)>().max(1);
    hint.unwrap_or(0).min(max)
}

impl<V: Serialize> Serialize for Registry<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for entry in self {
            map.serialize_entry(entry.identifier, entry.value)?;
        }
        map.end()
    }
}

struct RegistryVisitor<V> {
    marker: PhantomData<fn() -> Registry<V>>,
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for RegistryVisitor<V> {
    type Value = Registry<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of identifiers to entities")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let capacity = cautious_capacity::<V>(access.size_hint());
        let mut registry = Registry::with_config(RegistryConfig::with_capacity(capacity));
        while let Some((identifier, value)) = access.next_entry::<String, V>()? {
            registry.add(identifier, value);
        }
        Ok(registry)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Registry<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RegistryVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde::de::value::MapDeserializer;

    use super::*;

    #[test]
    fn test_serialize_as_ordered_map() {
        let mut registry = Registry::from_entries([("b", 2), ("a", 1)]);
        registry.add("c", 3);
        let json = serde_json::to_string(&registry).unwrap();
        assert_eq!(json, r#"{"b":2,"a":1,"c":3}"#);
    }

    #[test]
    fn test_deserialize_mints_fresh_handles() {
        let original = Registry::from_entries([("a", 1), ("b", 2)]);
        let json = serde_json::to_string(&original).unwrap();
        let restored: Registry<i32> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.get_all_identifiers(), original.get_all_identifiers());
        assert_eq!(restored.get("b"), Some(&2));
        assert_ne!(restored.handle("a"), original.handle("a"));
        restored.assert_consistent();
    }

    struct LyingLength<I> {
        inner: I,
    }

    impl<I: Iterator> Iterator for LyingLength<I> {
        type Item = I::Item;

        fn next(&mut self) -> Option<Self::Item> {
            self.inner.next()
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            (1 << 40, Some(1 << 40))
        }
    }

    #[test]
    fn test_deserialize_ignores_oversized_length_hint() {
        let entries = LyingLength {
            inner: vec![("a".to_string(), 1i32)].into_iter(),
        };
        let deserializer = MapDeserializer::<_, serde::de::value::Error>::new(entries);
        let registry = Registry::<i32>::deserialize(deserializer).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a"), Some(&1));
    }

    #[test]
    fn test_cautious_capacity_caps_hint() {
        assert_eq!(cautious_capacity::<u8>(None), 0);
        assert_eq!(cautious_capacity::<u8>(Some(16)), 16);
        let max = MAX_PREALLOC_BYTES / mem::size_of::<(String, u8)>();
        assert_eq!(cautious_capacity::<u8>(Some(usize::MAX)), max);
    }

    #[test]
    fn test_deserialize_rejects_non_map() {
        let result: Result<Registry<i32>, _> = serde_json::from_str("[1, 2]");
        assert!(result.is_err());
    }
}
