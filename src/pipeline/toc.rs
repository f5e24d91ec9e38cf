//! Table-of-contents generation.
//!
//! Inserts a `Table of Contents` heading and a flat link list ahead of the
//! document body. Runs before [`super::HeadingIdPass`], so the inserted
//! heading is itself slugged and autolinked like any other; the entry
//! targets are computed with the same slug allocator the ID pass will use,
//! with the inserted heading's own slug reserved first so every `#fragment`
//! lands on the id the ID pass actually assigns.

use crate::error::MarkdownerError;
use crate::pipeline::{Pass, Slugger};
use pulldown_cmark::{CowStr, Event, HeadingLevel, LinkType, Tag, TagEnd};

const TOC_TITLE: &str = "Table of Contents";

/// Prepends a generated table of contents to the event stream.
///
/// A document without headings is left unchanged.
pub struct TocPass;

impl Pass for TocPass {
    fn name(&self) -> &str {
        "toc"
    }

    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Result<Vec<Event<'a>>, MarkdownerError> {
        let titles = heading_titles(&events);
        if titles.is_empty() {
            return Ok(events);
        }

        let mut slugger = Slugger::new();
        // The inserted heading consumes the first slug slot, exactly as the
        // ID pass will see it.
        slugger.slug(TOC_TITLE);
        let entries: Vec<(String, String)> = titles
            .into_iter()
            .map(|title| {
                let slug = slugger.slug(&title);
                (title, slug)
            })
            .collect();

        let mut out = Vec::with_capacity(events.len() + 6 + entries.len() * 5);
        out.push(Event::Start(Tag::Heading {
            level: HeadingLevel::H2,
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
        }));
        out.push(Event::Text(CowStr::Borrowed(TOC_TITLE)));
        out.push(Event::End(TagEnd::Heading(HeadingLevel::H2)));

        out.push(Event::Start(Tag::List(None)));
        for (title, slug) in entries {
            out.push(Event::Start(Tag::Item));
            out.push(Event::Start(Tag::Link {
                link_type: LinkType::Inline,
                dest_url: CowStr::from(format!("#{slug}")),
                title: CowStr::Borrowed(""),
                id: CowStr::Borrowed(""),
            }));
            out.push(Event::Text(CowStr::from(title)));
            out.push(Event::End(TagEnd::Link));
            out.push(Event::End(TagEnd::Item));
        }
        out.push(Event::End(TagEnd::List(false)));

        out.extend(events);
        Ok(out)
    }
}

/// Collect the text of every heading, in document order.
fn heading_titles(events: &[Event<'_>]) -> Vec<String> {
    let mut titles = Vec::new();
    let mut current: Option<String> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { .. }) => current = Some(String::new()),
            Event::End(TagEnd::Heading(_)) => {
                if let Some(title) = current.take() {
                    titles.push(title);
                }
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some(title) = current.as_mut() {
                    title.push_str(t);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(title) = current.as_mut() {
                    title.push(' ');
                }
            }
            _ => {}
        }
    }

    titles
}
