//! Link resolution over reconciled content.

use crate::content::Inline;
use crate::errors::warn_unresolved_reference;
use crate::reconcile::{EntryContent, ReconciledEntry};
use crate::resolve::{LinkResolver, Resolution};
use quire_diagnostics::DiagnosticSink;

/// Resolves every reference in the entries' summaries and prose.
///
/// Resolved references become links. Unresolved ones become code voice and
/// each emits one `W302` at the reference's span; the entry is kept either
/// way. Returns the number of unresolved references.
pub fn merge_content(
    entries: &mut [ReconciledEntry],
    context_path: &str,
    resolver: &dyn LinkResolver,
    sink: &DiagnosticSink,
) -> usize {
    let mut unresolved = 0;
    for entry in entries.iter_mut() {
        for content in entry.content.values_mut() {
            unresolved += resolve_content(content, context_path, resolver, sink);
        }
    }
    if unresolved > 0 {
        tracing::debug!(context = context_path, unresolved, "unresolved references");
    }
    unresolved
}

fn resolve_content(
    content: &mut EntryContent,
    context_path: &str,
    resolver: &dyn LinkResolver,
    sink: &DiagnosticSink,
) -> usize {
    let mut unresolved = resolve_inlines(&mut content.summary, context_path, resolver, sink);
    for block in &mut content.prose {
        for inlines in block.inlines_mut() {
            unresolved += resolve_inlines(inlines, context_path, resolver, sink);
        }
    }
    unresolved
}

fn resolve_inlines(
    inlines: &mut [Inline],
    context_path: &str,
    resolver: &dyn LinkResolver,
    sink: &DiagnosticSink,
) -> usize {
    let mut unresolved = 0;
    for inline in inlines.iter_mut() {
        let Inline::Reference { target, span } = inline else {
            continue;
        };
        let (target, span) = (std::mem::take(target), *span);
        *inline = match resolver.resolve(&target, context_path) {
            Resolution::Resolved(link) => Inline::Link {
                destination: link.destination,
                title: link.title,
            },
            Resolution::Unresolved(reason) => {
                sink.emit(warn_unresolved_reference(&target, context_path, span, &reason));
                unresolved += 1;
                Inline::CodeVoice { code: target }
            }
        };
    }
    unresolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::extract_canonical;
    use crate::content::Block;
    use crate::directive::parse_possible_values;
    use crate::errors::W302;
    use crate::reconcile::reconcile;
    use crate::resolve::ReferenceIndex;
    use quire_source::FileId;

    fn index() -> ReferenceIndex {
        let mut index = ReferenceIndex::new();
        index.add_symbol("MyKit/Month");
        index.add_symbol("MyKit/Weekday");
        index.add_article("Calendars");
        index
    }

    fn merged(text: &str, sink: &DiagnosticSink) -> Vec<ReconciledEntry> {
        let canonical = extract_canonical(&["January", "February", "March"]);
        let documented = parse_possible_values(FileId::from_raw(0), text, 0);
        let mut entries = reconcile(&documented, &canonical).entries;
        merge_content(&mut entries, "MyKit/Month", &index(), sink);
        entries
    }

    #[test]
    fn one_bad_reference_one_diagnostic() {
        let text = "- PossibleValue January: The first month.\n\n  See ``Weekday`` and ``Mont``.\n";
        let sink = DiagnosticSink::new();
        let entries = merged(text, &sink);

        let diags = sink.take_all();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, W302);
        let span = diags[0].primary_span;
        assert_eq!(&text[span.start as usize..span.end as usize], "``Mont``");

        let Block::Paragraph { inlines } = &entries[0].content.primary().prose[0] else {
            panic!("expected a paragraph");
        };
        assert!(matches!(&inlines[1], Inline::Link { destination, .. } if destination == "MyKit/Weekday"));
        assert!(matches!(&inlines[3], Inline::CodeVoice { code } if code == "Mont"));
    }

    #[test]
    fn summary_references_are_resolved() {
        let sink = DiagnosticSink::new();
        let entries = merged("- PossibleValue March: Read <doc:Calendars>.\n", &sink);
        assert!(sink.take_all().is_empty());
        let summary = &entries[2].content.primary().summary;
        assert!(matches!(&summary[1], Inline::Link { title, .. } if title == "Calendars"));
    }

    #[test]
    fn unresolved_content_is_still_rendered() {
        let sink = DiagnosticSink::new();
        let entries = merged("- PossibleValue February: See ``Nowhere``.\n", &sink);
        assert_eq!(sink.take_all().len(), 1);
        assert!(entries[1].has_content());
    }

    #[test]
    fn lists_are_resolved() {
        let text = "- PossibleValue January: One.\n  - ``Month``\n  - ``Missing``\n";
        let sink = DiagnosticSink::new();
        let entries = merged(text, &sink);
        assert_eq!(sink.take_all().len(), 1);
        let Block::UnorderedList { items } = &entries[0].content.primary().prose[0] else {
            panic!("expected a list");
        };
        assert!(matches!(&items[0][0], Inline::Link { .. }));
        assert!(matches!(&items[1][0], Inline::CodeVoice { .. }));
    }
}
