//! Emoji substitution: gemoji shortcodes become Unicode glyphs.
//!
//! Only prose text is rewritten. Code spans arrive as `Event::Code` and are
//! never touched; text inside fenced or indented code blocks is skipped by
//! tracking block boundaries. Unknown shortcodes and literal glyphs already
//! present in the text pass through unchanged.

use crate::error::MarkdownerError;
use crate::pipeline::Pass;
use once_cell::sync::Lazy;
use pulldown_cmark::{CowStr, Event, Tag, TagEnd};
use regex::{Captures, Regex};
use std::borrow::Cow;

static SHORTCODE: Lazy<Regex> = Lazy::new(|| Regex::new(r":([A-Za-z0-9_+-]+):").unwrap());

/// Replaces `:shortcode:` tokens with their emoji glyphs.
pub struct EmojiPass;

impl Pass for EmojiPass {
    fn name(&self) -> &str {
        "emoji"
    }

    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Result<Vec<Event<'a>>, MarkdownerError> {
        let mut in_code_block = false;

        Ok(events
            .into_iter()
            .map(|event| match event {
                Event::Start(Tag::CodeBlock(_)) => {
                    in_code_block = true;
                    event
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    event
                }
                Event::Text(text) if !in_code_block => {
                    let replaced = match replace_shortcodes(&text) {
                        Cow::Owned(s) => Some(s),
                        Cow::Borrowed(_) => None,
                    };
                    match replaced {
                        Some(s) => Event::Text(CowStr::from(s)),
                        None => Event::Text(text),
                    }
                }
                other => other,
            })
            .collect())
    }
}

/// Substitute every known shortcode in `text`; unknown ones stay literal.
fn replace_shortcodes(text: &str) -> Cow<'_, str> {
    SHORTCODE.replace_all(text, |caps: &Captures| {
        match emojis::get_by_shortcode(&caps[1]) {
            Some(emoji) => emoji.as_str().to_owned(),
            None => caps[0].to_owned(),
        }
    })
}
