//! Diagnostic codes and constructors for possible-value reconciliation.
//!
//! `W301` reports an authored possible value the symbol doesn't declare.
//! `W302` reports a reference in authored content that doesn't resolve.
//! Both are warnings; configuration may promote or suppress them by code or
//! by rule name.

use crate::directive::DocumentedEntry;
use quire_diagnostics::{Category, Diagnostic, DiagnosticCode, Label, Solution};
use quire_source::Span;

/// An authored possible value that the symbol doesn't declare.
pub const W301: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 301,
};

/// A reference in authored content that doesn't resolve.
pub const W302: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 302,
};

/// Rule name for [`W301`].
pub const UNKNOWN_POSSIBLE_VALUE: &str = "unknown-possible-value";

/// Rule name for [`W302`].
pub const UNRESOLVED_REFERENCE: &str = "unresolved-reference";

const RULES: [(DiagnosticCode, &str); 2] = [
    (W301, UNKNOWN_POSSIBLE_VALUE),
    (W302, UNRESOLVED_REFERENCE),
];

/// Returns the rule name for a code this crate emits.
pub fn rule_name(code: DiagnosticCode) -> Option<&'static str> {
    RULES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
}

/// Looks up a rule by code (`W301`) or name (`unknown-possible-value`).
pub fn lookup_rule(rule: &str) -> Option<DiagnosticCode> {
    let parsed = rule.parse::<DiagnosticCode>().ok();
    RULES
        .iter()
        .find(|(code, name)| *name == rule || parsed == Some(*code))
        .map(|(code, _)| *code)
}

/// Creates a warning for an authored possible value the symbol doesn't declare.
pub fn warn_unknown_possible_value(
    entry: &DocumentedEntry,
    symbol_title: &str,
    solution: Solution,
) -> Diagnostic {
    Diagnostic::warning(
        W301,
        format!(
            "'{}' is not a known possible value for '{symbol_title}'.",
            entry.name
        ),
        entry.span,
    )
    .with_label(Label::new(entry.span, "unknown possible value"))
    .with_solution(solution)
}

/// Creates a warning for a reference that didn't resolve.
pub fn warn_unresolved_reference(
    target: &str,
    context_path: &str,
    span: Span,
    reason: &str,
) -> Diagnostic {
    Diagnostic::warning(
        W302,
        format!("'{target}' doesn't exist at '{context_path}'."),
        span,
    )
    .with_label(Label::new(span, "unresolved reference"))
    .with_note(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_diagnostics::Severity;
    use quire_source::FileId;

    #[test]
    fn codes_format() {
        assert_eq!(format!("{W301}"), "W301");
        assert_eq!(format!("{W302}"), "W302");
    }

    #[test]
    fn rules_resolve_by_code_or_name() {
        assert_eq!(lookup_rule("W301"), Some(W301));
        assert_eq!(lookup_rule("unresolved-reference"), Some(W302));
        assert_eq!(lookup_rule("W999"), None);
        assert_eq!(lookup_rule("E301"), None);
        assert_eq!(lookup_rule("Unknown-Possible-Value"), None);
        assert_eq!(rule_name(W301), Some(UNKNOWN_POSSIBLE_VALUE));
        assert_eq!(
            rule_name(DiagnosticCode::new(Category::Error, 301)),
            None
        );
    }

    #[test]
    fn unknown_value_diagnostic() {
        let entry = crate::directive::parse_possible_values(
            FileId::from_raw(0),
            "- PossibleValue Marc: x\n",
            0,
        )
        .remove(0);
        let d = warn_unknown_possible_value(&entry, "Month", Solution::advice("fix"));
        assert_eq!(d.code, W301);
        assert_eq!(d.severity, Severity::Warning);
        assert_eq!(d.message, "'Marc' is not a known possible value for 'Month'.");
        assert_eq!(d.primary_span, entry.span);
        assert_eq!(d.solutions.len(), 1);
    }

    #[test]
    fn unresolved_reference_diagnostic() {
        let span = Span::new(FileId::from_raw(0), 4, 13);
        let d = warn_unresolved_reference("Mont", "MyKit/Month", span, "no such symbol");
        assert_eq!(d.code, W302);
        assert!(d.message.contains("'Mont'"));
        assert_eq!(d.primary_span, span);
        assert_eq!(d.notes, ["no such symbol"]);
    }
}
