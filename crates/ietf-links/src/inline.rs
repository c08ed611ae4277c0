//! Inline reference matching and rewriting.
//!
//! Two pattern matchers scan inline text spans: one for RFC references
//! (`RFC-2616`, optionally with a `-anchor` suffix) and one for HTTP header
//! references (`HTTP-Content-Type`). A matched span renders as an anchor or
//! as plain text depending on the rendering mode fixed at configuration time,
//! except when the hyperlink guard finds the match bracketed like a markup
//! link label, in which case it always renders as inert text and the brackets
//! are swallowed.

use std::ops::Range;
use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;

use crate::table::{HeaderLinkTable, LinkTemplate};

/// RFC reference: `RFC` or `RFC-`, digits, optional `-anchor` suffix.
///
/// The `visible` capture is the portion replaced in rendered output; the
/// anchor stops before `]` so bracketed references keep their closing bracket.
static RFC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<visible>RFC-?(?P<number>[0-9]+))(?:-(?P<anchor>[^\]]*))?").unwrap()
});

/// HTTP header reference: literal `HTTP-` prefix, then a header-name token.
///
/// The prefix is consumed but not part of the `visible` capture.
static HEADER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"HTTP-(?P<visible>[A-Za-z][A-Za-z0-9-]+)").unwrap());

/// Inline node emitted in place of a matched reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Hyperlink with an `href` and a visible label.
    Anchor { href: String, text: String },
    /// Inert text with no markup.
    Text(String),
}

/// A candidate reference found in inline text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefMatch {
    /// Byte span of the full pattern match in the scanned text.
    pub span: Range<usize>,
    /// The text that stands in for the match when rendered plainly.
    pub visible: String,
    pub kind: RefKind,
}

/// What a match captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefKind {
    Rfc { number: u32, anchor: Option<String> },
    Header { name: String },
}

/// Rendering strategy fixed at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Emit anchor elements for recognized references.
    Link,
    /// Emit the visible text without a link.
    PlainText,
}

/// Output of a processor for one handled match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handled {
    pub element: Element,
    /// Byte span of the original text replaced by `element`.
    pub consumed: Range<usize>,
}

/// True when the match sits immediately inside square brackets, i.e. is
/// already the label of a markup-style link.
///
/// Out-of-range neighbors count as not bracketed.
fn within_hyperlink(span: &Range<usize>, data: &str) -> bool {
    let bytes = data.as_bytes();
    let before = span.start.checked_sub(1).and_then(|i| bytes.get(i));
    let after = bytes.get(span.end);
    before == Some(&b'[') && after == Some(&b']')
}

/// A registered inline matcher.
///
/// The host calls [`find`](Self::find) to locate the next candidate and
/// [`handle_match`](Self::handle_match) to turn it into output. Returning
/// `None` from `handle_match` is the no-match signal: the host resumes
/// scanning without consuming any text.
pub trait InlineProcessor {
    /// Next candidate match at or after byte offset `from`.
    fn find(&self, data: &str, from: usize) -> Option<RefMatch>;

    /// Element for a match the hyperlink guard let through.
    fn render(&self, m: &RefMatch) -> Element;

    /// Turn a match into output, applying the hyperlink guard.
    ///
    /// Bracketed matches render as inert text and the consumed span widens by
    /// one byte on each side to swallow the brackets.
    fn handle_match(&self, m: RefMatch, data: &str) -> Option<Handled> {
        if within_hyperlink(&m.span, data) {
            return Some(Handled {
                consumed: m.span.start - 1..m.span.end + 1,
                element: Element::Text(m.visible),
            });
        }
        Some(Handled {
            element: self.render(&m),
            consumed: m.span,
        })
    }
}

/// Matcher for `RFC-NNNN` references.
pub struct RfcProcessor {
    template: LinkTemplate,
    mode: RenderMode,
}

impl RfcProcessor {
    #[must_use]
    pub fn new(template: LinkTemplate, mode: RenderMode) -> Self {
        Self { template, mode }
    }
}

impl InlineProcessor for RfcProcessor {
    fn find(&self, data: &str, from: usize) -> Option<RefMatch> {
        let mut from = from;
        while let Some(caps) = RFC_PATTERN.captures_at(data, from) {
            let whole = caps.get(0).unwrap();
            let visible = caps.name("visible").unwrap();
            // Numbers too large for an RFC are left as literal text.
            let Ok(number) = caps["number"].parse::<u32>() else {
                from = whole.end();
                continue;
            };
            return Some(RefMatch {
                span: whole.range(),
                visible: visible.as_str().to_owned(),
                kind: RefKind::Rfc {
                    number,
                    anchor: caps.name("anchor").map(|m| m.as_str().to_owned()),
                },
            });
        }
        None
    }

    fn render(&self, m: &RefMatch) -> Element {
        let RefKind::Rfc { number, anchor } = &m.kind else {
            return Element::Text(m.visible.clone());
        };
        match self.mode {
            RenderMode::Link => Element::Anchor {
                href: self.template.expand_with_anchor(*number, anchor.as_deref()),
                text: format!("RFC-{number}"),
            },
            RenderMode::PlainText => Element::Text(m.visible.clone()),
        }
    }
}

/// Matcher for `HTTP-Header-Name` references.
pub struct HeaderProcessor {
    table: Arc<HeaderLinkTable>,
    mode: RenderMode,
}

impl HeaderProcessor {
    #[must_use]
    pub fn new(table: Arc<HeaderLinkTable>, mode: RenderMode) -> Self {
        Self { table, mode }
    }
}

impl InlineProcessor for HeaderProcessor {
    fn find(&self, data: &str, from: usize) -> Option<RefMatch> {
        let caps = HEADER_PATTERN.captures_at(data, from)?;
        let whole = caps.get(0).unwrap();
        let visible = caps.name("visible").unwrap();
        Some(RefMatch {
            span: whole.range(),
            visible: visible.as_str().to_owned(),
            kind: RefKind::Header {
                name: visible.as_str().to_ascii_lowercase(),
            },
        })
    }

    fn render(&self, m: &RefMatch) -> Element {
        let RefKind::Header { name } = &m.kind else {
            return Element::Text(m.visible.clone());
        };
        let label = title_case(name);
        if self.mode == RenderMode::PlainText {
            return Element::Text(label);
        }
        match self.table.href(name) {
            Some(href) => Element::Anchor { href, text: label },
            None => {
                tracing::debug!(header = %name, "no registry entry for header, rendering plain text");
                Element::Text(label)
            }
        }
    }
}

/// Title-case a header name: the first letter of each alphabetic run is
/// upper-cased, the rest lowered.
pub(crate) fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for c in name.chars() {
        if c.is_ascii_alphabetic() && !prev_alpha {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
        prev_alpha = c.is_ascii_alphabetic();
    }
    out
}

/// A piece of rewritten inline text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text between matches, passed through unmodified.
    Literal(String),
    /// Rendered replacement for a consumed span.
    Element(Element),
}

struct RegisteredProcessor {
    name: String,
    priority: u8,
    processor: Box<dyn InlineProcessor>,
}

/// Priority-ordered set of inline processors.
///
/// A minimal stand-in for the host pipeline's inline stage: processors are
/// registered under a name at a numeric priority, and [`apply`](Self::apply)
/// scans a text span with all of them, earliest match first. Ties on match
/// start go to the higher priority, then to registration order.
#[derive(Default)]
pub struct InlineRegistry {
    entries: Vec<RegisteredProcessor>,
}

impl InlineRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a processor under `name` at `priority`.
    pub fn register(
        &mut self,
        processor: Box<dyn InlineProcessor>,
        name: impl Into<String>,
        priority: u8,
    ) {
        self.entries.push(RegisteredProcessor {
            name: name.into(),
            priority,
            processor,
        });
        // Stable sort keeps registration order within a priority.
        self.entries
            .sort_by_key(|e| std::cmp::Reverse(e.priority));
    }

    /// Registered processor names, in scan-preference order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite `data` into literal segments interleaved with rendered
    /// elements.
    ///
    /// Text not consumed by any processor is passed through byte-for-byte.
    #[must_use]
    pub fn apply(&self, data: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut literal_from = 0;
        let mut scan_from = 0;

        while scan_from < data.len() {
            let mut best: Option<(usize, RefMatch)> = None;
            for (idx, entry) in self.entries.iter().enumerate() {
                if let Some(m) = entry.processor.find(data, scan_from) {
                    let earlier = best
                        .as_ref()
                        .is_none_or(|(_, b)| m.span.start < b.span.start);
                    if earlier {
                        best = Some((idx, m));
                    }
                }
            }
            let Some((idx, m)) = best else { break };
            let match_start = m.span.start;

            match self.entries[idx].processor.handle_match(m, data) {
                Some(handled) => {
                    if handled.consumed.start > literal_from {
                        segments.push(Segment::Literal(
                            data[literal_from..handled.consumed.start].to_owned(),
                        ));
                    }
                    literal_from = handled.consumed.end;
                    scan_from = handled.consumed.end;
                    segments.push(Segment::Element(handled.element));
                }
                None => {
                    // No-match signal: nothing consumed, keep scanning.
                    scan_from = match_start + 1;
                }
            }
        }

        if literal_from < data.len() {
            segments.push(Segment::Literal(data[literal_from..].to_owned()));
        }
        segments
    }
}
