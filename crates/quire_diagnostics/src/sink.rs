//! Thread-safe diagnostic accumulator shared by every stage of a build.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Collects the diagnostics of a build.
///
/// Stages receive a `&DiagnosticSink` and only append to it; whoever owns the
/// sink drains it with [`take_all`](Self::take_all). Per-severity counts are
/// kept atomically and survive draining, so a command can report totals
/// after the diagnostics have been rendered.
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    errors: AtomicUsize,
    warnings: AtomicUsize,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            errors: AtomicUsize::new(0),
            warnings: AtomicUsize::new(0),
        }
    }

    /// Appends one diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        self.count(&diag);
        self.diagnostics.lock().unwrap().push(diag);
    }

    /// Appends a batch of diagnostics contiguously, even when other threads
    /// emit at the same time.
    pub fn emit_all(&self, diags: impl IntoIterator<Item = Diagnostic>) {
        let mut diagnostics = self.diagnostics.lock().unwrap();
        for diag in diags {
            self.count(&diag);
            diagnostics.push(diag);
        }
    }

    /// Number of error-severity diagnostics emitted so far.
    pub fn error_count(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }

    /// Number of warning-severity diagnostics emitted so far.
    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }

    /// Takes every accumulated diagnostic, leaving the sink empty. Counts
    /// are not reset.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock().unwrap())
    }

    fn count(&self, diag: &Diagnostic) {
        let counter = match diag.severity {
            Severity::Error => &self.errors,
            Severity::Warning => &self.warnings,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}
