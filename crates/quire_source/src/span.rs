//! Byte ranges inside documentation files.

use crate::file_id::FileId;
use serde::{Deserialize, Serialize};

/// A byte range within a documentation file; `start` inclusive, `end` exclusive.
///
/// Entries, value names, and inline references each carry one so a warning
/// points at exactly the text that caused it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// The file the range belongs to.
    pub file: FileId,
    /// Offset of the first byte.
    pub start: u32,
    /// Offset one past the last byte.
    pub end: u32,
}

impl Span {
    /// A span with no authored location, for synthetic diagnostics.
    pub const DUMMY: Span = Span {
        file: FileId::DUMMY,
        start: 0,
        end: 0,
    };

    /// Creates a span covering `start..end` of `file`.
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    /// Number of bytes covered.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` for a zero-width span.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_span_length() {
        let month = FileId::from_raw(0);
        // "Marc" in "- PossibleValue Marc: x"
        let name = Span::new(month, 16, 20);
        assert_eq!(name.len(), 4);
        assert!(!name.is_empty());
        assert!(Span::DUMMY.is_empty());
    }

    #[test]
    fn serializes_file_and_offsets() {
        let json = serde_json::to_value(Span::new(FileId::from_raw(1), 10, 20)).unwrap();
        assert_eq!(json, serde_json::json!({ "file": 1, "start": 10, "end": 20 }));
    }
}
