//! Configuration types deserialized from `quire.toml`.

use serde::Deserialize;

/// The default maximum edit distance for a "replace with" suggestion.
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 3;

/// The top-level configuration parsed from `quire.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuireConfig {
    /// Project metadata and input locations.
    pub project: ProjectMeta,
    /// Possible-value reconciliation settings.
    #[serde(default)]
    pub possible_values: PossibleValuesConfig,
    /// Diagnostic severity overrides.
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// Project metadata and the locations of the build inputs.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectMeta {
    /// The documented module's name.
    pub name: String,
    /// Path to the symbol metadata JSON, relative to the project root.
    #[serde(default = "default_symbols_path")]
    pub symbols: String,
    /// Path to the documentation directory, relative to the project root.
    #[serde(default = "default_docs_path")]
    pub docs: String,
}

fn default_symbols_path() -> String {
    "symbols.json".to_string()
}

fn default_docs_path() -> String {
    "Docs".to_string()
}

/// Settings for reconciling authored possible values with declared ones.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PossibleValuesConfig {
    /// Largest edit distance at which an unknown name is matched to a
    /// declared one and offered as a replacement.
    #[serde(default = "default_max_edit_distance")]
    pub max_edit_distance: usize,
    /// What to do when several declared names share the minimal distance.
    #[serde(default)]
    pub tie_break: TieBreak,
}

fn default_max_edit_distance() -> usize {
    DEFAULT_MAX_EDIT_DISTANCE
}

impl Default for PossibleValuesConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            tie_break: TieBreak::default(),
        }
    }
}

/// Tie-break rule for near-miss suggestions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// A tie means no single best match; the generic suggestion is used.
    #[default]
    Ambiguous,
    /// The tied name declared first wins.
    FirstDeclared,
    /// The alphabetically smallest tied name wins.
    Alphabetical,
}

/// Severity overrides applied to emitted diagnostics.
///
/// Entries are diagnostic codes (`W301`) or rule names (`unknown-possible-value`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiagnosticsConfig {
    /// Diagnostics promoted to errors.
    #[serde(default)]
    pub deny: Vec<String>,
    /// Diagnostics suppressed entirely.
    #[serde(default)]
    pub allow: Vec<String>,
}
