//! Diagnostic creation, severity management, and rendering.
//!
//! This crate provides structured [`Diagnostic`] messages with a severity, a
//! code, a labelled source span, and suggested [`Solution`]s. The thread-safe
//! [`DiagnosticSink`] accumulates diagnostics during a build, and
//! [`DiagnosticRenderer`] implementations format them for a terminal or as JSON.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod renderer;
pub mod severity;
pub mod sink;
pub mod solution;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::Label;
pub use renderer::{DiagnosticRenderer, JsonRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
pub use solution::{Replacement, Solution};
