//! Near-miss suggestions for authored names that match no declared value.
//!
//! Candidates are ranked by Levenshtein distance. A single closest name
//! within `max_edit_distance` becomes a replacement; anything else gets the
//! generic advice listing every declared name.

use crate::canonical::CanonicalEntry;
use crate::directive::DocumentedEntry;
use quire_config::{PossibleValuesConfig, TieBreak};
use quire_diagnostics::Solution;

/// Computes the fix offered for an unknown possible value.
#[derive(Clone, Debug)]
pub struct SuggestionEngine {
    max_edit_distance: usize,
    tie_break: TieBreak,
}

impl SuggestionEngine {
    /// Creates an engine with the configured threshold and tie-break rule.
    pub fn new(config: &PossibleValuesConfig) -> Self {
        Self {
            max_edit_distance: config.max_edit_distance,
            tie_break: config.tie_break,
        }
    }

    /// Creates an engine with the default configuration.
    pub fn with_defaults() -> Self {
        Self::new(&PossibleValuesConfig::default())
    }

    /// Returns the declared entry closest to `name`, if one is close enough
    /// and the tie-break rule singles it out.
    pub fn best_match<'c>(
        &self,
        name: &str,
        canonical: &'c [CanonicalEntry],
    ) -> Option<&'c CanonicalEntry> {
        let scored: Vec<(usize, &CanonicalEntry)> = canonical
            .iter()
            .map(|entry| (strsim::levenshtein(name, &entry.name), entry))
            .collect();
        let min = scored.iter().map(|(distance, _)| *distance).min()?;
        if min > self.max_edit_distance {
            return None;
        }

        let tied: Vec<&CanonicalEntry> = scored
            .into_iter()
            .filter(|(distance, _)| *distance == min)
            .map(|(_, entry)| entry)
            .collect();
        if let [only] = tied.as_slice() {
            return Some(*only);
        }
        match self.tie_break {
            TieBreak::Ambiguous => None,
            TieBreak::FirstDeclared => tied.into_iter().min_by_key(|e| e.declaration_order),
            TieBreak::Alphabetical => tied.into_iter().min_by(|a, b| a.name.cmp(&b.name)),
        }
    }

    /// Returns the single solution attached to an unknown entry's diagnostic.
    pub fn suggest(&self, entry: &DocumentedEntry, canonical: &[CanonicalEntry]) -> Solution {
        match self.best_match(&entry.name, canonical) {
            Some(best) => {
                tracing::trace!(name = %entry.name, best = %best.name, "near match");
                Solution::replace(
                    format!("Replace '{}' with '{}'.", entry.name, best.name),
                    entry.name_span,
                    best.name.clone(),
                )
            }
            None => Solution::advice(generic_advice(&entry.name, canonical)),
        }
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn generic_advice(name: &str, canonical: &[CanonicalEntry]) -> String {
    let mut summary =
        format!("Remove '{name}' possible value documentation or replace it with a known value.");
    let mut known: Vec<&str> = canonical.iter().map(|c| c.name.as_str()).collect();
    known.sort_unstable();
    if !known.is_empty() {
        let list: Vec<String> = known.iter().map(|n| format!("'{n}'")).collect();
        summary.push_str(&format!("\nKnown values: {}.", list.join(", ")));
    }
    summary
}
