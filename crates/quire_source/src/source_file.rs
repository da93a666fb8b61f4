//! A loaded documentation file with its line index.

use std::path::PathBuf;

/// A documentation file loaded into the build.
///
/// Line starts are computed once at load so every diagnostic location
/// resolves with a binary search.
pub struct SourceFile {
    /// The filesystem path, or a synthetic name for in-memory sources.
    pub path: PathBuf,
    /// The full text of the file.
    pub content: String,
    /// Byte offset of each line start; the first entry is always 0.
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Creates a `SourceFile`, indexing its line starts.
    pub fn new(path: PathBuf, content: String) -> Self {
        let line_starts = compute_line_starts(&content);
        Self {
            path,
            content,
            line_starts,
        }
    }

    /// Returns the documentation body that begins at `start`, or `None` if
    /// `start` is past the end of the file or inside a character.
    pub fn body(&self, start: u32) -> Option<&str> {
        self.content.get(start as usize..)
    }

    /// Converts a byte offset into 1-indexed (line, column) coordinates.
    pub fn line_col(&self, byte_offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line = (line_idx as u32) + 1;
        let col = byte_offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Returns the line containing `byte_offset`, without its line ending.
    pub fn line_text(&self, byte_offset: u32) -> &str {
        let (line, _) = self.line_col(byte_offset);
        let start = self.line_starts[(line - 1) as usize] as usize;
        let end = self
            .line_starts
            .get(line as usize)
            .map_or(self.content.len(), |&next| next as usize);
        self.content[start..end].trim_end_matches(['\n', '\r'])
    }
}

fn compute_line_starts(content: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (i, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push((i + 1) as u32);
        }
    }
    starts
}
