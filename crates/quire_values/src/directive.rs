//! Extraction of authored possible-value entries from a documentation body.
//!
//! Two authoring forms are recognised, both as bullet list items:
//!
//! ```text
//! - PossibleValue January: The first month.
//!
//! - PossibleValues:
//!   - February: The second month.
//!
//!     Nested prose becomes the entry's content.
//!   - `March`: The third month.
//! ```
//!
//! The keyword is case-insensitive and may be written `Possible Value`.
//! Text inside code blocks or HTML is never a directive. Malformed items are
//! skipped without a diagnostic.

use crate::content::{blocks, inlines, plain_text, trim, Block, Body, Inline, Item, Node, Run, Spanned};
use pulldown_cmark::Event;
use quire_source::{FileId, Span};
use serde::{Deserialize, Serialize};

/// Which directive form an entry was written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthoringForm {
    /// `- PossibleValue <name>: <description>`
    Shorthand,
    /// A nested item under `- PossibleValues:`.
    Block,
}

/// A possible value as the author wrote it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentedEntry {
    /// The value name, without backticks.
    pub name: String,
    /// The span of the name alone.
    pub name_span: Span,
    /// The item's paragraph after the colon, continuation lines included.
    pub short_description: Vec<Inline>,
    /// Blocks nested under the item.
    pub prose: Vec<Block>,
    /// The item from its list marker to the end of its first paragraph.
    /// Nested children are not included.
    pub span: Span,
    /// The directive form the entry came from.
    pub form: AuthoringForm,
}

impl DocumentedEntry {
    /// Returns the short description as plain text.
    pub fn short_description_text(&self) -> String {
        plain_text(&self.short_description)
    }
}

enum Directive {
    /// The name starts at this byte within the item's paragraph.
    Single(usize),
    Block,
}

/// Parses every possible-value entry in `text`, in authored order.
///
/// `base` is the byte offset of `text` within `file`, so spans are
/// file-absolute even when the body starts partway into the file.
pub fn parse_possible_values(file: FileId, text: &str, base: u32) -> Vec<DocumentedEntry> {
    let body = Body { file, text, base };
    let mut entries = Vec::new();
    find_directives(&body, &body.parse(), &mut entries);
    entries
}

/// Walks lists and block quotes looking for directive items.
fn find_directives(body: &Body<'_>, nodes: &[Node<'_>], entries: &mut Vec<DocumentedEntry>) {
    for node in nodes {
        match node {
            Node::List { start, items } => {
                for item in items {
                    if start.is_some() || !directive_item(body, item, entries) {
                        find_directives(body, &item.children, entries);
                    }
                }
            }
            Node::Quote(children) => find_directives(body, children, entries),
            Node::Inlines(_) | Node::Code { .. } => {}
        }
    }
}

/// Reads `item` as a directive. Returns `false` if it isn't one.
fn directive_item(body: &Body<'_>, item: &Item<'_>, entries: &mut Vec<DocumentedEntry>) -> bool {
    let Some((Node::Inlines(lead), rest)) = item.children.split_first() else {
        return false;
    };
    let Some(directive) = match_directive(body.slice(&lead.range)) else {
        return false;
    };

    match directive {
        Directive::Single(offset) => entries.extend(value_entry(
            body,
            item,
            lead,
            offset,
            rest,
            AuthoringForm::Shorthand,
        )),
        Directive::Block => {
            for node in rest {
                let Node::List { start: None, items } = node else {
                    continue;
                };
                for value in items {
                    if let Some((Node::Inlines(lead), prose)) = value.children.split_first() {
                        entries.extend(value_entry(
                            body,
                            value,
                            lead,
                            0,
                            prose,
                            AuthoringForm::Block,
                        ));
                    }
                }
            }
        }
    }
    true
}

/// Matches `PossibleValue <name>…` or `PossibleValues:` at the start of an
/// item's paragraph.
fn match_directive(text: &str) -> Option<Directive> {
    let mut consumed = strip_keyword(text, "possible")?;
    let after = &text[consumed..];
    consumed += after.len() - after.trim_start_matches([' ', '\t']).len();
    consumed += strip_keyword(&text[consumed..], "value")?;

    let rest = &text[consumed..];
    if let Some(rest) = rest.strip_prefix(['s', 'S']) {
        return (rest.trim() == ":").then_some(Directive::Block);
    }
    let name = rest.trim_start_matches([' ', '\t']);
    (name.len() < rest.len()).then(|| Directive::Single(text.len() - name.len()))
}

fn strip_keyword(text: &str, keyword: &str) -> Option<usize> {
    text.get(..keyword.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(keyword))
        .map(|_| keyword.len())
}

/// Builds an entry from an item whose paragraph reads `<name>: <description>`
/// from byte `offset` on.
fn value_entry(
    body: &Body<'_>,
    item: &Item<'_>,
    lead: &Run<'_>,
    offset: usize,
    prose: &[Node<'_>],
    form: AuthoringForm,
) -> Option<DocumentedEntry> {
    let paragraph = body.slice(&lead.range);
    let (name_start, name_end, colon) = split_name(&paragraph[offset..])?;
    let name = &paragraph[offset + name_start..offset + name_end];
    if name.trim().is_empty() || name.contains(['\n', '\r']) {
        return None;
    }

    let origin = lead.range.start + offset;
    let mut short_description = inlines(body, &after(body, &lead.events, origin + colon + 1));
    trim(&mut short_description);

    let marker = item.start + leading_blanks(&body.text[item.start..]);
    let end = lead.range.start + paragraph.trim_end().len();
    Some(DocumentedEntry {
        name: name.to_string(),
        name_span: body.span(&(origin + name_start..origin + name_end)),
        short_description,
        prose: blocks(body, prose),
        span: body.span(&(marker..end)),
        form,
    })
}

/// Returns the events from byte `cut` on, splitting a text event that
/// straddles it.
fn after<'a>(body: &Body<'a>, events: &[Spanned<'a>], cut: usize) -> Vec<Spanned<'a>> {
    let mut out = Vec::new();
    for (event, range) in events {
        if range.start >= cut {
            out.push((event.clone(), range.clone()));
        } else if range.end > cut && matches!(event, Event::Text(_)) {
            let rest = cut..range.end;
            out.push((Event::Text(body.slice(&rest).into()), rest));
        }
    }
    out
}

fn leading_blanks(text: &str) -> usize {
    text.len() - text.trim_start_matches([' ', '\t']).len()
}

/// Returns the name's byte range and the colon's index within `text`.
fn split_name(text: &str) -> Option<(usize, usize, usize)> {
    if let Some(quoted) = text.strip_prefix('`') {
        let close = quoted.find('`')? + 1;
        let after = &text[close + 1..];
        let gap = after.len() - after.trim_start().len();
        if !after[gap..].starts_with(':') {
            return None;
        }
        return Some((1, close, close + 1 + gap));
    }
    let colon = text.find(':')?;
    Some((0, text[..colon].trim_end().len(), colon))
}
