//! Syntax highlighting: language-aware markup for fenced code blocks.
//!
//! A fenced block with an info string is replaced by a pre-rendered HTML
//! fragment: a `<code>` element carrying a `language-<lang>` class with
//! syntect class-style token spans inside. Styling is left to the embedding
//! application's stylesheet; no inline colours are emitted. Blocks whose
//! language syntect does not know keep the class marker but fall back to
//! plain escaped source. Untagged and indented blocks are left for the
//! default serialiser.

use crate::error::MarkdownerError;
use crate::pipeline::Pass;
use once_cell::sync::Lazy;
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAXES: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// Annotates fenced code blocks with language classes and token spans.
pub struct HighlightPass;

impl Pass for HighlightPass {
    fn name(&self) -> &str {
        "highlight"
    }

    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Result<Vec<Event<'a>>, MarkdownerError> {
        let mut out = Vec::with_capacity(events.len());
        // Language token and accumulated source of the open fenced block.
        let mut open: Option<(String, String)> = None;

        for event in events {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                    match language_token(&info) {
                        Some(lang) => open = Some((lang, String::new())),
                        None => {
                            out.push(Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))))
                        }
                    }
                }
                Event::Text(text) => match open.as_mut() {
                    Some((_, source)) => source.push_str(&text),
                    None => out.push(Event::Text(text)),
                },
                Event::End(TagEnd::CodeBlock) => match open.take() {
                    Some((lang, source)) => {
                        out.push(Event::Html(CowStr::from(annotate(&lang, &source)?)))
                    }
                    None => out.push(event),
                },
                other => out.push(other),
            }
        }

        Ok(out)
    }
}

/// First token of a fence info string, e.g. `js` from ```` ```js,linenos ````.
fn language_token(info: &str) -> Option<String> {
    let token = info.split([',', ' ']).next().unwrap_or("").trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Render one code block to an HTML fragment with a language class marker.
fn annotate(lang: &str, source: &str) -> Result<String, MarkdownerError> {
    let mut html = String::with_capacity(source.len() * 2 + 64);
    html.push_str("<pre><code class=\"language-");
    html.push_str(&html_escape::encode_double_quoted_attribute(lang));
    html.push_str("\">");

    match SYNTAXES.find_syntax_by_token(lang) {
        Some(syntax) => {
            let mut generator =
                ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAXES, ClassStyle::Spaced);
            for line in LinesWithEndings::from(source) {
                generator
                    .parse_html_for_line_which_includes_newline(line)
                    .map_err(|e| MarkdownerError::pass("highlight", e.to_string()))?;
            }
            html.push_str(&generator.finalize());
        }
        None => html.push_str(&html_escape::encode_text(source)),
    }

    html.push_str("</code></pre>\n");
    Ok(html)
}
