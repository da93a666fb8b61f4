//! Turns unmatched authored entries into diagnostics.

use crate::canonical::CanonicalEntry;
use crate::directive::DocumentedEntry;
use crate::errors::warn_unknown_possible_value;
use crate::suggest::SuggestionEngine;
use quire_diagnostics::DiagnosticSink;

/// Emits one `W301` per extra entry, in authored order.
///
/// Implicit entries are not reported. The sink is only appended to.
pub fn emit_unknown_values(
    extras: &[&DocumentedEntry],
    canonical: &[CanonicalEntry],
    symbol_title: &str,
    engine: &SuggestionEngine,
    sink: &DiagnosticSink,
) {
    sink.emit_all(extras.iter().map(|entry| {
        let solution = engine.suggest(entry, canonical);
        warn_unknown_possible_value(entry, symbol_title, solution)
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::extract_canonical;
    use crate::directive::parse_possible_values;
    use crate::reconcile::reconcile;
    use quire_source::FileId;

    fn run(text: &str) -> Vec<quire_diagnostics::Diagnostic> {
        let canonical = extract_canonical(&["January", "February", "March"]);
        let documented = parse_possible_values(FileId::from_raw(0), text, 0);
        let result = reconcile(&documented, &canonical);
        let sink = DiagnosticSink::new();
        emit_unknown_values(
            &result.extras,
            &canonical,
            "Month",
            &SuggestionEngine::with_defaults(),
            &sink,
        );
        sink.take_all()
    }

    #[test]
    fn subset_is_silent() {
        assert!(run("- PossibleValue January: One.\n- PossibleValue March: Three.\n").is_empty());
    }

    #[test]
    fn one_diagnostic_per_extra_in_authored_order() {
        let diags = run(
            "- PossibleValue April: x\n- PossibleValue January: y\n- PossibleValue Marc: z\n",
        );
        assert_eq!(diags.len(), 2);
        assert!(diags[0].message.contains("'April'"));
        assert!(diags[1].message.contains("'Marc'"));
        assert!(diags.iter().all(|d| d.solutions.len() == 1));
        assert_eq!(diags[1].solutions[0].summary, "Replace 'Marc' with 'March'.");
    }

    #[test]
    fn existing_diagnostics_are_kept() {
        let sink = DiagnosticSink::new();
        sink.emit(crate::errors::warn_unresolved_reference(
            "x",
            "MyKit",
            quire_source::Span::DUMMY,
            "missing",
        ));
        let documented = parse_possible_values(FileId::from_raw(0), "- PossibleValue Z: z\n", 0);
        let extras: Vec<_> = documented.iter().collect();
        emit_unknown_values(&extras, &[], "Month", &SuggestionEngine::default(), &sink);
        assert_eq!(sink.take_all().len(), 2);
    }
}
