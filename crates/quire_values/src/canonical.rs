//! The canonical, declaration-ordered value names of a symbol.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Anything that can list a symbol's declared value names in order.
///
/// Symbol-graph ingestion implements this; the reconciliation core never
/// looks further into the metadata.
pub trait ValueSource {
    /// Returns the declared value names, in declaration order.
    fn declared_values(&self) -> Vec<&str>;
}

impl<T: AsRef<str>> ValueSource for [T] {
    fn declared_values(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

impl<T: AsRef<str>, const N: usize> ValueSource for [T; N] {
    fn declared_values(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

impl<T: AsRef<str>> ValueSource for Vec<T> {
    fn declared_values(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

/// A declared value name and its position among the declared values.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalEntry {
    /// The value name.
    pub name: String,
    /// Zero-based position in declaration order.
    pub declaration_order: usize,
}

/// Reads the canonical entries from `source`.
///
/// When a name is declared more than once the first declaration wins and
/// later ones are dropped, so orders stay dense.
pub fn extract_canonical<S: ValueSource + ?Sized>(source: &S) -> Vec<CanonicalEntry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for name in source.declared_values() {
        if !seen.insert(name) {
            tracing::trace!(name, "ignoring duplicate declared value");
            continue;
        }
        entries.push(CanonicalEntry {
            name: name.to_string(),
            declaration_order: entries.len(),
        });
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_declaration_order() {
        let entries = extract_canonical(&["January", "February", "March"]);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["January", "February", "March"]);
        let orders: Vec<_> = entries.iter().map(|e| e.declaration_order).collect();
        assert_eq!(orders, [0, 1, 2]);
    }

    #[test]
    fn first_duplicate_wins() {
        let values = vec!["b".to_string(), "a".to_string(), "b".to_string(), "c".to_string()];
        let entries = extract_canonical(&values);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert_eq!(entries[2].declaration_order, 2);
    }

    #[test]
    fn empty_source() {
        let values: Vec<&str> = Vec::new();
        assert!(extract_canonical(&values).is_empty());
    }

    #[test]
    fn names_are_case_sensitive() {
        let entries = extract_canonical(&["on", "On", "ON"]);
        assert_eq!(entries.len(), 3);
    }
}
