//! Link normalisation: rewrite every link and image to inline form.
//!
//! The parser has already resolved reference-style targets by the time the
//! event stream exists, so normalisation is a matter of erasing how the
//! link was written: reference, collapsed, shortcut, and autolink variants
//! all become plain inline links with the resolved destination. Reference
//! labels are cleared so no serialiser can reconstruct the original form.

use crate::error::MarkdownerError;
use crate::pipeline::Pass;
use pulldown_cmark::{CowStr, Event, LinkType, Tag};

/// Rewrites all links and images to `LinkType::Inline`.
pub struct InlineLinksPass;

impl Pass for InlineLinksPass {
    fn name(&self) -> &str {
        "inline-links"
    }

    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Result<Vec<Event<'a>>, MarkdownerError> {
        Ok(events
            .into_iter()
            .map(|event| match event {
                Event::Start(Tag::Link {
                    dest_url, title, ..
                }) => Event::Start(Tag::Link {
                    link_type: LinkType::Inline,
                    dest_url,
                    title,
                    id: CowStr::Borrowed(""),
                }),
                Event::Start(Tag::Image {
                    dest_url, title, ..
                }) => Event::Start(Tag::Image {
                    link_type: LinkType::Inline,
                    dest_url,
                    title,
                    id: CowStr::Borrowed(""),
                }),
                other => other,
            })
            .collect())
    }
}
