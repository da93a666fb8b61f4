//! Identifiers for documentation files loaded into a build.

use serde::{Deserialize, Serialize};

/// Names a file held by the [`SourceDb`](crate::SourceDb); assigned in load
/// order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// Stands in for a file that doesn't exist. No [`SourceDb`](crate::SourceDb)
    /// ever hands it out.
    pub const DUMMY: FileId = FileId(u32::MAX);

    /// Creates a `FileId` from its load-order index.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
