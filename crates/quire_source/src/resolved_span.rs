//! Spans translated to the line/column form shown to authors.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A span as a file path plus 1-indexed line and byte-column bounds.
///
/// The end coordinate names the last byte inside the span. Produced by
/// [`SourceDb::resolve_span`](crate::SourceDb::resolve_span) and serialized
/// as the `location` of JSON diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSpan {
    /// The documentation file.
    pub file_path: PathBuf,
    /// Line of the first byte.
    pub start_line: u32,
    /// Column of the first byte.
    pub start_col: u32,
    /// Line of the last byte.
    pub end_line: u32,
    /// Column of the last byte.
    pub end_col: u32,
}

impl fmt::Display for ResolvedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file_path.display(),
            self.start_line,
            self.start_col
        )
    }
}
