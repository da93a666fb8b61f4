//! The prose model attached to documented possible values.
//!
//! Documentation bodies are read with `pulldown-cmark`; its event stream is
//! folded into a small block tree that keeps the byte range of every inline
//! event. Only what an entry's content needs is modelled: paragraphs, code
//! listings, and lists, with inline text, code voice, links, and references.
//! Every reference keeps the byte span it was written at so an unresolved
//! target can be reported precisely.

use std::ops::Range;

use crate::resolve::ARTICLE_PREFIX;
use pulldown_cmark::{CodeBlockKind, Event, LinkType, Options, Parser, Tag, TagEnd};
use quire_source::{FileId, Span};
use serde::{Deserialize, Serialize};

/// A run of inline content inside a paragraph, list item, or summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// Plain text.
    Text {
        /// The text.
        text: String,
    },
    /// Code voice written with single backticks.
    CodeVoice {
        /// The code, without the backticks.
        code: String,
    },
    /// A symbol (``` ``Path`` ```) or article (`<doc:Name>`) reference that
    /// has not been resolved yet.
    Reference {
        /// The reference target; article targets keep their `doc:` prefix.
        target: String,
        /// Where the reference was written, delimiters included.
        span: Span,
    },
    /// A link to a page, either written as one or resolved from a reference.
    Link {
        /// The page identifier or URL.
        destination: String,
        /// The text shown for the link.
        title: String,
    },
}

/// A block of prose content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph; soft line breaks become single spaces.
    Paragraph {
        /// The paragraph's inline content.
        inlines: Vec<Inline>,
    },
    /// A fenced or indented code listing.
    CodeListing {
        /// The info string after the opening fence, if any.
        language: Option<String>,
        /// The listing's lines.
        code: Vec<String>,
    },
    /// A bullet list.
    UnorderedList {
        /// One inline run per item.
        items: Vec<Vec<Inline>>,
    },
    /// A numbered list.
    OrderedList {
        /// The number of the first item.
        start: u64,
        /// One inline run per item.
        items: Vec<Vec<Inline>>,
    },
}

impl Block {
    /// Returns the inline runs this block contains.
    pub fn inlines_mut(&mut self) -> Vec<&mut Vec<Inline>> {
        match self {
            Block::Paragraph { inlines } => vec![inlines],
            Block::CodeListing { .. } => Vec::new(),
            Block::UnorderedList { items } | Block::OrderedList { items, .. } => {
                items.iter_mut().collect()
            }
        }
    }
}

/// Flattens inline content into its displayed text.
pub fn plain_text(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text { text } => text.as_str(),
            Inline::CodeVoice { code } => code.as_str(),
            Inline::Reference { target, .. } => target.as_str(),
            Inline::Link { title, .. } => title.as_str(),
        })
        .collect()
}

/// A parser event with its byte range in the body.
pub(crate) type Spanned<'a> = (Event<'a>, Range<usize>);

/// Consecutive inline events: a paragraph, a heading, or the text of a
/// tight list item.
pub(crate) struct Run<'a> {
    pub events: Vec<Spanned<'a>>,
    /// From the first event's start to the last event's end.
    pub range: Range<usize>,
}

impl<'a> Run<'a> {
    fn new(events: Vec<Spanned<'a>>) -> Option<Self> {
        let start = events.first()?.1.start;
        let end = events.iter().map(|(_, range)| range.end).max()?;
        Some(Self {
            events,
            range: start..end,
        })
    }
}

/// A list item and the blocks inside it.
pub(crate) struct Item<'a> {
    /// Offset of the item, at or just before its list marker.
    pub start: usize,
    pub children: Vec<Node<'a>>,
}

/// A block-level node of a documentation body.
///
/// HTML blocks and thematic breaks are dropped while building the tree.
pub(crate) enum Node<'a> {
    Inlines(Run<'a>),
    Code {
        language: Option<String>,
        code: String,
    },
    List {
        /// `Some` for numbered lists.
        start: Option<u64>,
        items: Vec<Item<'a>>,
    },
    Quote(Vec<Node<'a>>),
}

/// A documentation body and where it sits in its file.
#[derive(Clone, Copy)]
pub(crate) struct Body<'a> {
    pub file: FileId,
    pub text: &'a str,
    /// Byte offset of `text` within `file`.
    pub base: u32,
}

impl<'a> Body<'a> {
    /// Parses the body into its block tree.
    pub fn parse(&self) -> Vec<Node<'a>> {
        let mut events = Parser::new_ext(self.text, Options::empty()).into_offset_iter();
        build(&mut events)
    }

    /// Returns the file-absolute span of a body-relative range.
    pub fn span(&self, range: &Range<usize>) -> Span {
        Span::new(
            self.file,
            self.base + range.start as u32,
            self.base + range.end as u32,
        )
    }

    pub fn slice(&self, range: &Range<usize>) -> &'a str {
        &self.text[range.clone()]
    }
}

/// Builds nodes until the end of the enclosing container.
fn build<'a, I>(events: &mut I) -> Vec<Node<'a>>
where
    I: Iterator<Item = Spanned<'a>>,
{
    let mut nodes = Vec::new();
    let mut loose = Vec::new();
    let mut depth = 0usize;
    while let Some((event, range)) = events.next() {
        match event {
            Event::Start(Tag::Paragraph | Tag::Heading { .. }) => {
                flush(&mut loose, &mut nodes);
                nodes.extend(Run::new(inline_run(events)).map(Node::Inlines));
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                flush(&mut loose, &mut nodes);
                nodes.push(code_block(kind, events));
            }
            Event::Start(Tag::List(start)) => {
                flush(&mut loose, &mut nodes);
                nodes.push(Node::List {
                    start,
                    items: list_items(events),
                });
            }
            Event::Start(Tag::BlockQuote(_)) => {
                flush(&mut loose, &mut nodes);
                nodes.push(Node::Quote(build(events)));
            }
            Event::Start(Tag::HtmlBlock) => {
                flush(&mut loose, &mut nodes);
                skip_block(events);
            }
            Event::Rule => flush(&mut loose, &mut nodes),
            Event::End(_) if depth == 0 => break,
            Event::Start(_) => {
                depth += 1;
                loose.push((event, range));
            }
            Event::End(_) => {
                depth -= 1;
                loose.push((event, range));
            }
            _ => loose.push((event, range)),
        }
    }
    flush(&mut loose, &mut nodes);
    nodes
}

fn flush<'a>(loose: &mut Vec<Spanned<'a>>, nodes: &mut Vec<Node<'a>>) {
    nodes.extend(Run::new(std::mem::take(loose)).map(Node::Inlines));
}

/// Collects the inline events of a paragraph or heading, consuming its end.
fn inline_run<'a, I>(events: &mut I) -> Vec<Spanned<'a>>
where
    I: Iterator<Item = Spanned<'a>>,
{
    let mut run = Vec::new();
    let mut depth = 0usize;
    while let Some((event, range)) = events.next() {
        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            _ => {}
        }
        run.push((event, range));
    }
    run
}

fn code_block<'a, I>(kind: CodeBlockKind<'a>, events: &mut I) -> Node<'a>
where
    I: Iterator<Item = Spanned<'a>>,
{
    let language = match kind {
        CodeBlockKind::Fenced(info) => Some(info.trim().to_string()).filter(|s| !s.is_empty()),
        CodeBlockKind::Indented => None,
    };
    let mut code = String::new();
    while let Some((event, _)) = events.next() {
        match event {
            Event::Text(text) => code.push_str(&text),
            Event::End(_) => break,
            _ => {}
        }
    }
    Node::Code { language, code }
}

fn list_items<'a, I>(events: &mut I) -> Vec<Item<'a>>
where
    I: Iterator<Item = Spanned<'a>>,
{
    let mut items = Vec::new();
    while let Some((Event::Start(Tag::Item), range)) = events.next() {
        items.push(Item {
            start: range.start,
            children: build(events),
        });
    }
    items
}

fn skip_block<'a, I>(events: &mut I)
where
    I: Iterator<Item = Spanned<'a>>,
{
    while let Some((event, _)) = events.next() {
        if matches!(event, Event::End(_)) {
            break;
        }
    }
}

/// A link whose end event hasn't been seen yet.
struct OpenLink {
    destination: String,
    title: String,
    span: Span,
    reference: bool,
}

impl OpenLink {
    fn finish(self) -> Inline {
        if self.reference {
            Inline::Reference {
                target: self.destination,
                span: self.span,
            }
        } else {
            Inline::Link {
                destination: self.destination,
                title: self.title,
            }
        }
    }
}

/// Converts inline events into the prose model.
///
/// Double-backtick code spans become symbol references and `<doc:…>`
/// autolinks become article references. Emphasis is flattened to its text.
pub(crate) fn inlines(body: &Body<'_>, events: &[Spanned<'_>]) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut link: Option<OpenLink> = None;
    for (event, range) in events {
        let piece = match event {
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                ..
            }) => {
                link = Some(OpenLink {
                    destination: dest_url.to_string(),
                    title: String::new(),
                    span: body.span(range),
                    reference: *link_type == LinkType::Autolink
                        && dest_url.starts_with(ARTICLE_PREFIX),
                });
                continue;
            }
            Event::End(TagEnd::Link) => {
                out.extend(link.take().map(OpenLink::finish));
                continue;
            }
            Event::Text(text) => Inline::Text {
                text: text.to_string(),
            },
            Event::Code(code) => {
                let target = code.trim();
                if body.slice(range).starts_with("``") && !target.is_empty() {
                    Inline::Reference {
                        target: target.to_string(),
                        span: body.span(range),
                    }
                } else {
                    Inline::CodeVoice {
                        code: code.to_string(),
                    }
                }
            }
            Event::SoftBreak | Event::HardBreak => Inline::Text {
                text: " ".to_string(),
            },
            _ => continue,
        };
        match &mut link {
            Some(open) => open.title.push_str(&plain_text(std::slice::from_ref(&piece))),
            None => push_inline(&mut out, piece),
        }
    }
    out
}

/// Converts block nodes into prose blocks.
pub(crate) fn blocks(body: &Body<'_>, nodes: &[Node<'_>]) -> Vec<Block> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            Node::Inlines(run) => out.push(Block::Paragraph {
                inlines: inlines(body, &run.events),
            }),
            Node::Code { language, code } => out.push(Block::CodeListing {
                language: language.clone(),
                code: code.lines().map(|line| line.trim_end().to_string()).collect(),
            }),
            Node::List { start, items } => {
                let items = items
                    .iter()
                    .map(|item| item_inlines(body, &item.children))
                    .collect();
                out.push(match start {
                    Some(start) => Block::OrderedList {
                        start: *start,
                        items,
                    },
                    None => Block::UnorderedList { items },
                });
            }
            Node::Quote(children) => out.extend(blocks(body, children)),
        }
    }
    out
}

/// Flattens everything inside a list item into one inline run.
fn item_inlines(body: &Body<'_>, nodes: &[Node<'_>]) -> Vec<Inline> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            Node::Inlines(run) => join(&mut out, inlines(body, &run.events)),
            Node::Code { code, .. } => join(
                &mut out,
                vec![Inline::CodeVoice {
                    code: code.trim_end().to_string(),
                }],
            ),
            Node::List { items, .. } => {
                for item in items {
                    join(&mut out, item_inlines(body, &item.children));
                }
            }
            Node::Quote(children) => join(&mut out, item_inlines(body, children)),
        }
    }
    out
}

fn join(out: &mut Vec<Inline>, piece: Vec<Inline>) {
    if piece.is_empty() {
        return;
    }
    if !out.is_empty() {
        push_inline(
            out,
            Inline::Text {
                text: " ".to_string(),
            },
        );
    }
    for inline in piece {
        push_inline(out, inline);
    }
}

/// Appends an inline, merging text into a preceding text run.
fn push_inline(out: &mut Vec<Inline>, inline: Inline) {
    if let (Some(Inline::Text { text: previous }), Inline::Text { text }) = (out.last_mut(), &inline)
    {
        previous.push_str(text);
        return;
    }
    out.push(inline);
}

/// Strips whitespace at both ends of an inline run.
pub(crate) fn trim(inlines: &mut Vec<Inline>) {
    if let Some(Inline::Text { text }) = inlines.first_mut() {
        *text = text.trim_start().to_string();
    }
    if let Some(Inline::Text { text }) = inlines.last_mut() {
        *text = text.trim_end().to_string();
    }
    inlines.retain(|inline| !matches!(inline, Inline::Text { text } if text.is_empty()));
}
