//! Reconciliation of authored possible-value documentation with the values a
//! symbol declares.
//!
//! The pipeline for one symbol:
//!
//! 1. [`parse_possible_values`] extracts the authored entries with spans.
//! 2. [`extract_canonical`] reads the declared names from a [`ValueSource`].
//! 3. [`reconcile`] aligns both by exact, case-sensitive name.
//! 4. [`emit_unknown_values`] reports each authored name that isn't declared,
//!    with a fix from the [`SuggestionEngine`].
//! 5. [`merge_content`] resolves references through a [`LinkResolver`].
//! 6. [`route`] chooses between the compact attribute list and the detailed
//!    section.
//!
//! [`PossibleValuesPass`] runs these steps for a symbol or, in parallel, for
//! a whole catalog.

#![warn(missing_docs)]

pub mod canonical;
pub mod content;
pub mod directive;
pub mod emit;
pub mod errors;
pub mod merge;
pub mod pass;
pub mod reconcile;
pub mod render;
pub mod resolve;
pub mod suggest;
pub mod symbol;
pub mod variant;

pub use canonical::{extract_canonical, CanonicalEntry, ValueSource};
pub use content::{plain_text, Block, Inline};
pub use directive::{parse_possible_values, AuthoringForm, DocumentedEntry};
pub use emit::emit_unknown_values;
pub use merge::merge_content;
pub use pass::{DocBody, PossibleValuesPass, SymbolInput, SymbolOutput};
pub use reconcile::{reconcile, EntryContent, ReconciledEntry, Reconciliation};
pub use render::{
    route, Attribute, AttributesSection, PossibleValue, PossibleValuesSection, RenderMode,
    RenderPlan, RenderSection,
};
pub use resolve::{LinkResolver, ReferenceIndex, Resolution, ResolvedLink};
pub use suggest::SuggestionEngine;
pub use symbol::{SymbolAttributes, SymbolMetadata};
pub use variant::{VariantMap, VariantTag};
