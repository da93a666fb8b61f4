//! How serious a diagnostic is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity of a diagnostic.
///
/// Reconciliation only emits warnings; a `deny` rule promotes a code to
/// [`Error`](Severity::Error), which fails `quire check`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A problem the author should fix; the build still succeeds.
    Warning,
    /// A problem that fails the build.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_outrank_warnings() {
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn display_and_serde_agree() {
        for severity in [Severity::Warning, Severity::Error] {
            let json = serde_json::to_string(&severity).unwrap();
            assert_eq!(json, format!("\"{severity}\""));
        }
    }
}
