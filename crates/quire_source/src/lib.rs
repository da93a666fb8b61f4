//! Documentation source management and span tracking for diagnostics.
//!
//! [`SourceDb`] owns the text of every documentation file in a build.
//! [`FileId`] and [`Span`] locate parsed entries and references inside that
//! text, and [`ResolvedSpan`] turns byte offsets into the 1-indexed
//! line/column ranges shown to authors.

#![warn(missing_docs)]

pub mod file_id;
pub mod resolved_span;
pub mod source_db;
pub mod source_file;
pub mod span;

pub use file_id::FileId;
pub use resolved_span::ResolvedSpan;
pub use source_db::SourceDb;
pub use source_file::SourceFile;
pub use span::Span;
