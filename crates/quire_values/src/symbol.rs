//! Structural metadata for a documented symbol.

use crate::canonical::ValueSource;
use serde::{Deserialize, Serialize};

/// Attributes the metadata states about a symbol's values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolAttributes {
    /// The default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// The smallest accepted value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<String>,
    /// The largest accepted value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<String>,
}

/// One symbol as described by the symbol graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMetadata {
    /// The symbol's path, e.g. `MyKit/Month`.
    pub path: String,
    /// The display title; defaults to the last path component.
    #[serde(default)]
    pub title: String,
    /// Declared value names in declaration order.
    #[serde(default)]
    pub values: Vec<String>,
    /// Other attributes of the symbol.
    #[serde(default)]
    pub attributes: SymbolAttributes,
}

impl SymbolMetadata {
    /// Creates metadata for `path` declaring `values`.
    pub fn new<I, S>(path: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into(),
            title: String::new(),
            values: values.into_iter().map(Into::into).collect(),
            attributes: SymbolAttributes::default(),
        }
    }

    /// Sets the symbol's attributes.
    pub fn with_attributes(mut self, attributes: SymbolAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Returns the title used in user-facing messages.
    pub fn display_title(&self) -> &str {
        if !self.title.is_empty() {
            return &self.title;
        }
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

impl ValueSource for SymbolMetadata {
    fn declared_values(&self) -> Vec<&str> {
        self.values.iter().map(String::as_str).collect()
    }
}
