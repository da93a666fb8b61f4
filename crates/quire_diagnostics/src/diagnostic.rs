//! Structured diagnostics: severity, code, location, and suggested fixes.

use crate::code::DiagnosticCode;
use crate::label::Label;
use crate::severity::Severity;
use crate::solution::Solution;
use quire_source::Span;
use serde::{Deserialize, Serialize};

/// One problem found in authored documentation.
///
/// The primary span names both the file and the byte range the diagnostic is
/// about. `solutions` is ordered; renderers show them in sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The code identifying the kind of diagnostic.
    pub code: DiagnosticCode,
    /// The one-line summary shown to the author.
    pub message: String,
    /// The source span where the issue was detected.
    pub primary_span: Span,
    /// Text shown under the primary span.
    pub labels: Vec<Label>,
    /// Explanatory footnotes, e.g. why a reference didn't resolve.
    pub notes: Vec<String>,
    /// Proposed corrections, in presentation order.
    pub solutions: Vec<Solution>,
}

impl Diagnostic {
    /// Creates a new diagnostic with the given severity, code, message, and span.
    pub fn new(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            primary_span: span,
            labels: Vec::new(),
            notes: Vec::new(),
            solutions: Vec::new(),
        }
    }

    /// Creates a new warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Warning, code, message, span)
    }

    /// Adds a label to this diagnostic.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Appends a solution after any already attached.
    pub fn with_solution(mut self, solution: Solution) -> Self {
        self.solutions.push(solution);
        self
    }
}
