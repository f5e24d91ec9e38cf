//! Heading passes: stable DOM identifiers and self-referencing anchors.
//!
//! [`HeadingIdPass`] assigns each heading a GitHub-style slug id in document
//! order, de-duplicating repeats with `-1`, `-2`… suffixes. The slugs are
//! the contract every downstream consumer of heading identity relies on —
//! the autolink pass and the table-of-contents pass both build `#fragment`
//! targets from them — so this pass must run before either.

use crate::error::MarkdownerError;
use crate::pipeline::Pass;
use pulldown_cmark::{CowStr, Event, LinkType, Tag, TagEnd};
use std::collections::HashMap;

/// Reduce heading text to a GitHub-style slug.
///
/// Lowercases, keeps alphanumerics and underscores, collapses whitespace
/// and hyphen runs to a single `-`, and drops the rest. Text with nothing
/// usable left falls back to `section`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else if c.is_whitespace() || c == '-' {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        slug.push_str("section");
    }
    slug
}

/// Slug allocator that keeps identifiers unique within one document.
#[derive(Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the slug for the next heading with this text.
    ///
    /// The first occurrence gets the bare slug; repeats get `-1`, `-2`…
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 {
            base.clone()
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        slug
    }
}

/// Assigns a unique slug id to every heading.
pub struct HeadingIdPass;

impl Pass for HeadingIdPass {
    fn name(&self) -> &str {
        "heading-ids"
    }

    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Result<Vec<Event<'a>>, MarkdownerError> {
        let mut slugger = Slugger::new();
        let mut out = Vec::with_capacity(events.len());
        // Index of the open heading's Start event in `out`, plus the text
        // accumulated for it so far.
        let mut open: Option<(usize, String)> = None;

        for event in events {
            match event {
                Event::Start(Tag::Heading { .. }) => {
                    open = Some((out.len(), String::new()));
                    out.push(event);
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((start, text)) = open.take() {
                        let slug = slugger.slug(&text);
                        if let Event::Start(Tag::Heading { id, .. }) = &mut out[start] {
                            *id = Some(CowStr::from(slug));
                        }
                    }
                    out.push(event);
                }
                Event::Text(ref t) | Event::Code(ref t) => {
                    if let Some((_, text)) = open.as_mut() {
                        text.push_str(t);
                    }
                    out.push(event);
                }
                Event::SoftBreak | Event::HardBreak => {
                    if let Some((_, text)) = open.as_mut() {
                        text.push(' ');
                    }
                    out.push(event);
                }
                _ => out.push(event),
            }
        }

        Ok(out)
    }
}

/// Wraps each heading's content in a link to the heading's own id.
///
/// Depends on [`HeadingIdPass`] having assigned ids; headings without one
/// are left unwrapped.
pub struct HeadingAutolinkPass;

impl Pass for HeadingAutolinkPass {
    fn name(&self) -> &str {
        "heading-autolinks"
    }

    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Result<Vec<Event<'a>>, MarkdownerError> {
        let mut out = Vec::with_capacity(events.len() + 8);
        let mut wrapped = false;

        for event in events {
            match event {
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) => {
                    let href = id.as_ref().map(|id| format!("#{id}"));
                    out.push(Event::Start(Tag::Heading {
                        level,
                        id,
                        classes,
                        attrs,
                    }));
                    if let Some(href) = href {
                        out.push(Event::Start(Tag::Link {
                            link_type: LinkType::Inline,
                            dest_url: CowStr::from(href),
                            title: CowStr::Borrowed(""),
                            id: CowStr::Borrowed(""),
                        }));
                        wrapped = true;
                    }
                }
                Event::End(TagEnd::Heading(level)) => {
                    if wrapped {
                        out.push(Event::End(TagEnd::Link));
                        wrapped = false;
                    }
                    out.push(Event::End(TagEnd::Heading(level)));
                }
                _ => out.push(event),
            }
        }

        Ok(out)
    }
}
