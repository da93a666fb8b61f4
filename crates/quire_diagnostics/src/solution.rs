//! Suggested solutions attached to diagnostics.

use quire_source::Span;
use serde::{Deserialize, Serialize};

/// A text replacement proposed as part of a [`Solution`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// The source span to replace.
    pub span: Span,
    /// The new text to insert in place of the span.
    pub new_text: String,
}

/// A proposed correction for a diagnostic.
///
/// Solutions are advisory. Nothing in the compiler applies them; editors and
/// the author decide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// A description of what this solution does.
    pub summary: String,
    /// The edit implementing the solution, when it can be expressed as one.
    pub replacement: Option<Replacement>,
}

impl Solution {
    /// Creates a solution that only describes the fix.
    pub fn advice(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            replacement: None,
        }
    }

    /// Creates a solution that replaces `span` with `new_text`.
    pub fn replace(summary: impl Into<String>, span: Span, new_text: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            replacement: Some(Replacement {
                span,
                new_text: new_text.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advice_has_no_replacement() {
        let s = Solution::advice("Remove the entry.");
        assert_eq!(s.summary, "Remove the entry.");
        assert!(s.replacement.is_none());
    }

    #[test]
    fn replace_carries_edit() {
        let s = Solution::replace("Replace 'Marc' with 'March'.", Span::DUMMY, "March");
        let r = s.replacement.unwrap();
        assert_eq!(r.new_text, "March");
        assert_eq!(r.span, Span::DUMMY);
    }
}
