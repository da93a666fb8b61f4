//! Chooses how a symbol's possible values appear on its page.
//!
//! With no authored content anywhere the declared names are listed as an
//! "allowed values" attribute. Otherwise they get a dedicated section and the
//! attribute is left out.

use crate::content::{Block, Inline};
use crate::reconcile::ReconciledEntry;
use crate::symbol::SymbolAttributes;
use serde::{Deserialize, Serialize};

/// How the possible values are presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Names only, inside the attributes region.
    CompactAttributeList,
    /// A possible-values section with per-entry content.
    DetailedSection,
}

impl RenderMode {
    /// Picks the mode for a reconciled entry list.
    ///
    /// Any content in any variant of any entry selects
    /// [`DetailedSection`](Self::DetailedSection).
    pub fn for_entries(entries: &[ReconciledEntry]) -> Self {
        if entries.iter().any(ReconciledEntry::has_content) {
            RenderMode::DetailedSection
        } else {
            RenderMode::CompactAttributeList
        }
    }
}

/// One item in the attributes region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Attribute {
    /// The default value.
    Default {
        /// The value.
        value: String,
    },
    /// The smallest accepted value.
    Minimum {
        /// The value.
        value: String,
    },
    /// The largest accepted value.
    Maximum {
        /// The value.
        value: String,
    },
    /// The declared value names, in declaration order.
    AllowedValues {
        /// The names.
        values: Vec<String>,
    },
}

/// The attributes summary region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributesSection {
    /// The attributes, in display order.
    pub attributes: Vec<Attribute>,
}

/// One value in the possible-values section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PossibleValue {
    /// The declared name.
    pub name: String,
    /// The short description; empty when undocumented.
    pub summary: Vec<Inline>,
    /// Resolved prose.
    pub content: Vec<Block>,
}

/// The detailed possible-values section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PossibleValuesSection {
    /// Every declared value, in declaration order.
    pub values: Vec<PossibleValue>,
}

/// A region of a symbol page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderSection {
    /// The attributes summary.
    Attributes(AttributesSection),
    /// The possible-values section.
    PossibleValues(PossibleValuesSection),
}

/// The sections a symbol page shows for its possible values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderPlan {
    /// The chosen mode.
    pub mode: RenderMode,
    /// Sections in page order.
    pub sections: Vec<RenderSection>,
}

impl RenderPlan {
    /// Returns the attributes section, if any.
    pub fn attributes(&self) -> Option<&AttributesSection> {
        self.sections.iter().find_map(|section| match section {
            RenderSection::Attributes(attributes) => Some(attributes),
            RenderSection::PossibleValues(_) => None,
        })
    }

    /// Returns the possible-values section, if any.
    pub fn possible_values(&self) -> Option<&PossibleValuesSection> {
        self.sections.iter().find_map(|section| match section {
            RenderSection::PossibleValues(values) => Some(values),
            RenderSection::Attributes(_) => None,
        })
    }

    /// Returns the compact allowed-values list, if the plan has one.
    pub fn allowed_values(&self) -> Option<&[String]> {
        self.attributes()?
            .attributes
            .iter()
            .find_map(|attribute| match attribute {
                Attribute::AllowedValues { values } => Some(values.as_slice()),
                _ => None,
            })
    }
}

/// Builds the render plan for `entries` in `variant`.
///
/// The mode depends only on whether any entry has content; the authoring
/// form plays no part. Variants without their own content use the primary.
pub fn route(
    entries: &[ReconciledEntry],
    attributes: &SymbolAttributes,
    variant: Option<&str>,
) -> RenderPlan {
    let mode = RenderMode::for_entries(entries);

    let mut region = Vec::new();
    if let Some(value) = &attributes.default {
        region.push(Attribute::Default {
            value: value.clone(),
        });
    }
    if let Some(value) = &attributes.minimum {
        region.push(Attribute::Minimum {
            value: value.clone(),
        });
    }
    if let Some(value) = &attributes.maximum {
        region.push(Attribute::Maximum {
            value: value.clone(),
        });
    }

    let mut sections = Vec::new();
    match mode {
        RenderMode::CompactAttributeList => {
            if !entries.is_empty() {
                region.push(Attribute::AllowedValues {
                    values: entries.iter().map(|e| e.name.clone()).collect(),
                });
            }
            if !region.is_empty() {
                sections.push(RenderSection::Attributes(AttributesSection {
                    attributes: region,
                }));
            }
        }
        RenderMode::DetailedSection => {
            if !region.is_empty() {
                sections.push(RenderSection::Attributes(AttributesSection {
                    attributes: region,
                }));
            }
            let values = entries
                .iter()
                .map(|entry| {
                    let content = entry.content.get(variant);
                    PossibleValue {
                        name: entry.name.clone(),
                        summary: content.summary.clone(),
                        content: content.prose.clone(),
                    }
                })
                .collect();
            sections.push(RenderSection::PossibleValues(PossibleValuesSection { values }));
        }
    }

    RenderPlan { mode, sections }
}
