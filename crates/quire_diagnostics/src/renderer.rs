//! Diagnostic rendering backends for human-readable and machine-readable output.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use quire_source::{ResolvedSpan, SourceDb, Span};
use serde::Serialize;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// warning[W301]: 'Marc' is not a known possible value for 'Month'.
///   --> Docs/Month.md:7:3
///    |
///  7 | - PossibleValue Marc: The third month.
///    | ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ unknown possible value
///    |
///    = fix: Replace 'Marc' with 'March'.
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// The terminal width; underlines are clipped to it.
    pub width: u16,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool, width: u16) -> Self {
        Self { color, width }
    }

    fn paint_severity(&self, severity: Severity) -> String {
        if !self.color {
            return severity.to_string();
        }
        let ansi = match severity {
            Severity::Error => "31",
            Severity::Warning => "33",
        };
        format!("\x1b[1;{ansi}m{severity}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "{}[{}]: {}\n",
            self.paint_severity(diag.severity),
            diag.code,
            diag.message
        ));

        if let Some(file) = source_db.try_get_file(diag.primary_span.file) {
            let span = diag.primary_span;
            let resolved = source_db.resolve_span(span);
            out.push_str(&format!("  --> {resolved}\n"));

            let line_num = resolved.start_line.to_string();
            let padding = " ".repeat(line_num.len());
            let line_content = file.line_text(span.start);

            out.push_str(&format!("{padding} |\n"));
            out.push_str(&format!("{line_num} | {line_content}\n"));

            // Underline stops at the end of the first line.
            let col = resolved.start_col as usize;
            let remaining = line_content.len().saturating_sub(col - 1);
            let span_len = (span.len() as usize)
                .min(remaining)
                .min(self.width as usize)
                .max(1);
            let carets = "^".repeat(span_len);
            let col_padding = " ".repeat(col.saturating_sub(1));

            let primary_msg = diag
                .labels
                .iter()
                .find(|l| l.span == span)
                .map(|l| format!(" {}", l.message))
                .unwrap_or_default();

            out.push_str(&format!("{padding} | {col_padding}{carets}{primary_msg}\n"));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }

        for solution in &diag.solutions {
            let mut lines = solution.summary.lines();
            if let Some(first) = lines.next() {
                out.push_str(&format!("   = fix: {first}\n"));
            }
            for rest in lines {
                out.push_str(&format!("          {rest}\n"));
            }
        }

        out
    }
}

/// Renders each diagnostic as a JSON object with resolved line/column ranges.
///
/// Spans are resolved against the [`SourceDb`] so consumers never need the
/// byte offsets.
pub struct JsonRenderer {
    /// Whether to pretty-print the output.
    pub pretty: bool,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    severity: Severity,
    code: String,
    message: &'a str,
    location: Option<ResolvedSpan>,
    notes: &'a [String],
    solutions: Vec<JsonSolution<'a>>,
}

#[derive(Serialize)]
struct JsonSolution<'a> {
    summary: &'a str,
    replacement: Option<JsonReplacement<'a>>,
}

#[derive(Serialize)]
struct JsonReplacement<'a> {
    location: Option<ResolvedSpan>,
    new_text: &'a str,
}

impl JsonRenderer {
    /// Creates a new JSON renderer.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Renders a list of diagnostics as one JSON array.
    pub fn render_all(&self, diags: &[Diagnostic], source_db: &SourceDb) -> String {
        let items: Vec<JsonDiagnostic<'_>> =
            diags.iter().map(|d| to_json(d, source_db)).collect();
        self.serialize(&items)
    }

    fn serialize<T: Serialize>(&self, value: &T) -> String {
        let result = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        result.unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
    }
}

impl DiagnosticRenderer for JsonRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        self.serialize(&to_json(diag, source_db))
    }
}

fn to_json<'a>(diag: &'a Diagnostic, source_db: &SourceDb) -> JsonDiagnostic<'a> {
    JsonDiagnostic {
        severity: diag.severity,
        code: diag.code.to_string(),
        message: &diag.message,
        location: locate(diag.primary_span, source_db),
        notes: &diag.notes,
        solutions: diag
            .solutions
            .iter()
            .map(|s| JsonSolution {
                summary: &s.summary,
                replacement: s.replacement.as_ref().map(|r| JsonReplacement {
                    location: locate(r.span, source_db),
                    new_text: &r.new_text,
                }),
            })
            .collect(),
    }
}

fn locate(span: Span, source_db: &SourceDb) -> Option<ResolvedSpan> {
    source_db
        .try_get_file(span.file)
        .map(|_| source_db.resolve_span(span))
}
