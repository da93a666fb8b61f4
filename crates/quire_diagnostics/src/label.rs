//! Messages attached to the underlined span of a diagnostic.

use quire_source::Span;
use serde::{Deserialize, Serialize};

/// Text printed after the carets that underline `span`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The underlined source span.
    pub span: Span,
    /// Short text shown next to the underline, e.g. `unknown possible value`.
    pub message: String,
}

impl Label {
    /// Creates a label for `span`.
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}
