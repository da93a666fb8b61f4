//! Shared foundational types for the Quire documentation compiler.
//!
//! This crate provides interned identifiers for symbol paths and article
//! names, fingerprints of reconciled output, and the internal-error
//! result type.

#![warn(missing_docs)]

pub mod hash;
pub mod ident;
pub mod result;

pub use hash::ContentHash;
pub use ident::{Ident, Interner};
pub use result::{InternalError, QuireResult};
