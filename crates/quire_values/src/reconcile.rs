//! Alignment of authored entries with declared values by exact name.

use crate::canonical::CanonicalEntry;
use crate::content::{Block, Inline};
use crate::directive::DocumentedEntry;
use crate::variant::VariantMap;
use quire_source::Span;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Authored content for one value in one variant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryContent {
    /// The short description.
    #[serde(default)]
    pub summary: Vec<Inline>,
    /// The nested prose.
    #[serde(default)]
    pub prose: Vec<Block>,
    /// The authored entry's span.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Span>,
}

impl EntryContent {
    /// Returns `true` if there is neither a summary nor prose.
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.prose.is_empty()
    }

    fn from_documented(entry: &DocumentedEntry) -> Self {
        Self {
            summary: entry.short_description.clone(),
            prose: entry.prose.clone(),
            source: Some(entry.span),
        }
    }
}

/// One declared value with whatever the author wrote about it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledEntry {
    /// The declared name.
    pub name: String,
    /// The declaration order of the name.
    pub canonical_order: usize,
    /// Authored content, per variant.
    pub content: VariantMap<EntryContent>,
}

impl ReconciledEntry {
    /// Returns `true` if any variant carries authored content.
    pub fn has_content(&self) -> bool {
        self.content.values().any(|content| !content.is_empty())
    }
}

/// The outcome of reconciling one documentation body.
#[derive(Debug)]
pub struct Reconciliation<'a> {
    /// One entry per canonical entry, in declaration order.
    pub entries: Vec<ReconciledEntry>,
    /// Authored entries that name a declared value, in authored order.
    pub matched: Vec<&'a DocumentedEntry>,
    /// Authored entries that name no declared value, in authored order.
    pub extras: Vec<&'a DocumentedEntry>,
    /// Declared values nobody documented, in declaration order.
    pub implicit: Vec<&'a CanonicalEntry>,
}

/// Partitions `documented` against `canonical` and builds the entry list.
///
/// Output order follows `canonical` only. When a declared name is
/// documented more than once the first authored entry supplies the content.
pub fn reconcile<'a>(
    documented: &'a [DocumentedEntry],
    canonical: &'a [CanonicalEntry],
) -> Reconciliation<'a> {
    let declared: HashSet<&str> = canonical.iter().map(|c| c.name.as_str()).collect();

    let mut authored: HashMap<&str, &DocumentedEntry> = HashMap::new();
    let mut matched = Vec::new();
    let mut extras = Vec::new();
    for entry in documented {
        if declared.contains(entry.name.as_str()) {
            authored.entry(entry.name.as_str()).or_insert(entry);
            matched.push(entry);
        } else {
            extras.push(entry);
        }
    }

    let mut entries = Vec::with_capacity(canonical.len());
    let mut implicit = Vec::new();
    for value in canonical {
        let content = match authored.get(value.name.as_str()) {
            Some(entry) => EntryContent::from_documented(entry),
            None => {
                implicit.push(value);
                EntryContent::default()
            }
        };
        entries.push(ReconciledEntry {
            name: value.name.clone(),
            canonical_order: value.declaration_order,
            content: VariantMap::new(content),
        });
    }

    Reconciliation {
        entries,
        matched,
        extras,
        implicit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::extract_canonical;
    use crate::directive::parse_possible_values;
    use quire_source::FileId;

    fn months() -> Vec<CanonicalEntry> {
        extract_canonical(&["January", "February", "March"])
    }

    fn authored(text: &str) -> Vec<DocumentedEntry> {
        parse_possible_values(FileId::from_raw(0), text, 0)
    }

    fn names(entries: &[ReconciledEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn canonical_order_wins_over_authored_order() {
        let canonical = months();
        let documented = authored(
            "- PossibleValue March: Third.\n- PossibleValue January: First.\n",
        );
        let result = reconcile(&documented, &canonical);
        assert_eq!(names(&result.entries), ["January", "February", "March"]);
        assert_eq!(result.matched.len(), 2);
        assert!(result.extras.is_empty());
        assert_eq!(result.implicit.len(), 1);
        assert_eq!(result.implicit[0].name, "February");
        assert!(result.entries[0].has_content());
        assert!(!result.entries[1].has_content());
    }

    #[test]
    fn extras_never_become_entries() {
        let canonical = months();
        let documented = authored("- PossibleValue Marc: Typo.\n- PossibleValue April: Extra.\n");
        let result = reconcile(&documented, &canonical);
        assert_eq!(result.entries.len(), 3);
        let extras: Vec<_> = result.extras.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(extras, ["Marc", "April"]);
        assert_eq!(result.implicit.len(), 3);
        assert!(result.entries.iter().all(|e| !e.has_content()));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let canonical = months();
        let documented = authored("- PossibleValue january: Lowercase.\n");
        let result = reconcile(&documented, &canonical);
        assert_eq!(result.extras.len(), 1);
        assert!(result.matched.is_empty());
    }

    #[test]
    fn first_duplicate_supplies_content() {
        let canonical = months();
        let documented = authored(
            "- PossibleValue January: First.\n- PossibleValue January: Second.\n",
        );
        let result = reconcile(&documented, &canonical);
        assert_eq!(result.matched.len(), 2);
        assert!(result.extras.is_empty());
        let summary = &result.entries[0].content.primary().summary;
        assert_eq!(crate::content::plain_text(summary), "First.");
    }

    #[test]
    fn empty_canonical_makes_everything_extra() {
        let documented = authored("- PossibleValue January: First.\n");
        let result = reconcile(&documented, &[]);
        assert!(result.entries.is_empty());
        assert_eq!(result.extras.len(), 1);
    }

    #[test]
    fn entry_with_only_a_name_has_no_content() {
        let canonical = months();
        let documented = authored("- PossibleValue January:\n");
        let result = reconcile(&documented, &canonical);
        assert_eq!(result.matched.len(), 1);
        assert!(!result.entries[0].has_content());
        assert!(result.entries[0].content.primary().source.is_some());
    }
}
