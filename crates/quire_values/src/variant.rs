//! Values that may differ per documentation variant.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifies a documentation variant, e.g. a source language.
pub type VariantTag = String;

/// A primary value plus optional per-variant overrides.
///
/// Lookups for a tag without an override fall back to the primary value,
/// so a symbol documented once serves every variant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantMap<T> {
    primary: T,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    variants: BTreeMap<VariantTag, T>,
}

impl<T> VariantMap<T> {
    /// Creates a map holding only a primary value.
    pub fn new(primary: T) -> Self {
        Self {
            primary,
            variants: BTreeMap::new(),
        }
    }

    /// Returns the primary value.
    pub fn primary(&self) -> &T {
        &self.primary
    }

    /// Returns the value for `tag`, or the primary value if `tag` is `None`
    /// or has no override.
    pub fn get(&self, tag: Option<&str>) -> &T {
        tag.and_then(|tag| self.variants.get(tag))
            .unwrap_or(&self.primary)
    }

    /// Sets the override for `tag`, returning the previous one.
    pub fn insert(&mut self, tag: impl Into<VariantTag>, value: T) -> Option<T> {
        self.variants.insert(tag.into(), value)
    }

    /// Returns the tags with overrides, in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    /// Iterates the primary value followed by every override.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.primary).chain(self.variants.values())
    }

    /// Mutably iterates the primary value followed by every override.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        std::iter::once(&mut self.primary).chain(self.variants.values_mut())
    }

    /// Consumes the map, returning the primary value.
    pub fn into_primary(self) -> T {
        self.primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_primary() {
        let mut map = VariantMap::new("swift");
        map.insert("occ", "objective-c");
        assert_eq!(*map.get(None), "swift");
        assert_eq!(*map.get(Some("occ")), "objective-c");
        assert_eq!(*map.get(Some("data")), "swift");
    }

    #[test]
    fn values_start_with_primary() {
        let mut map = VariantMap::new(1);
        map.insert("b", 3);
        map.insert("a", 2);
        assert_eq!(map.values().copied().collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(map.tags().collect::<Vec<_>>(), ["a", "b"]);
        for value in map.values_mut() {
            *value *= 10;
        }
        assert_eq!(map.into_primary(), 10);
    }

    #[test]
    fn single_variant_serializes_flat() {
        let map = VariantMap::new("x".to_string());
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, serde_json::json!({ "primary": "x" }));
    }
}
