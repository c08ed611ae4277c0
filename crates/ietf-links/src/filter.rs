//! Reference rewriting as an iterator adapter over pulldown-cmark events.
//!
//! [`IetfLinkFilter`] applies a configured extension to the `Event::Text`
//! spans of a markdown event stream, splicing in link events for recognized
//! references. Text inside code blocks and inside existing links passes
//! through unchanged.

use std::collections::VecDeque;

use pulldown_cmark::{CowStr, Event, LinkType, Tag, TagEnd};

use crate::extension::IetfLinksExtension;
use crate::inline::{Element, InlineRegistry, Segment};

/// Iterator adapter that rewrites RFC and HTTP header references.
pub struct IetfLinkFilter<'a, I: Iterator<Item = Event<'a>>> {
    iter: std::iter::Peekable<I>,
    registry: InlineRegistry,
    pending: VecDeque<Event<'a>>,
    link_depth: usize,
    in_code_block: bool,
}

impl<'a, I: Iterator<Item = Event<'a>>> IetfLinkFilter<'a, I> {
    /// Wrap an event iterator with the extension's matchers.
    ///
    /// Each filter owns fresh matcher instances bound to the extension's
    /// shared link table, so independent passes over separate documents can
    /// run concurrently from one extension.
    pub fn new(iter: I, extension: &IetfLinksExtension) -> Self {
        Self {
            iter: iter.peekable(),
            registry: extension.registry(),
            pending: VecDeque::new(),
            link_depth: 0,
            in_code_block: false,
        }
    }

    /// Rewrite a text span, or `None` when no reference matched.
    fn rewrite(&self, text: &str) -> Option<Vec<Event<'static>>> {
        let segments = self.registry.apply(text);
        if !segments
            .iter()
            .any(|s| matches!(s, Segment::Element(_)))
        {
            return None;
        }

        let mut events = Vec::with_capacity(segments.len());
        for segment in segments {
            match segment {
                Segment::Literal(text) | Segment::Element(Element::Text(text)) => {
                    events.push(Event::Text(CowStr::from(text)));
                }
                Segment::Element(Element::Anchor { href, text }) => {
                    events.push(Event::Start(Tag::Link {
                        link_type: LinkType::Inline,
                        dest_url: CowStr::from(href),
                        title: CowStr::Borrowed(""),
                        id: CowStr::Borrowed(""),
                    }));
                    events.push(Event::Text(CowStr::from(text)));
                    events.push(Event::End(TagEnd::Link));
                }
            }
        }
        Some(events)
    }
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for IetfLinkFilter<'a, I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        let event = self.iter.next()?;
        match &event {
            Event::Start(Tag::Link { .. }) => self.link_depth += 1,
            Event::End(TagEnd::Link) => self.link_depth = self.link_depth.saturating_sub(1),
            Event::Start(Tag::CodeBlock(_)) => self.in_code_block = true,
            Event::End(TagEnd::CodeBlock) => self.in_code_block = false,
            _ => {}
        }

        if self.link_depth > 0 || self.in_code_block {
            return Some(event);
        }
        let Event::Text(first) = event else {
            return Some(event);
        };

        // Unresolved link brackets arrive as separate text events; coalesce
        // the run so the hyperlink guard sees the surrounding brackets.
        let mut text = first.into_string();
        while matches!(self.iter.peek(), Some(Event::Text(_))) {
            if let Some(Event::Text(next)) = self.iter.next() {
                text.push_str(&next);
            }
        }

        match self.rewrite(&text) {
            Some(events) => {
                self.pending.extend(events);
                self.pending.pop_front()
            }
            None => Some(Event::Text(CowStr::from(text))),
        }
    }
}
