//! Frontmatter splitting: separate a leading YAML metadata block from the
//! Markdown body.
//!
//! A block is recognised only at the very start of the document: a line that
//! is exactly `---`, the YAML payload, and a closing `---` line. Anything
//! else — including a `---` thematic break later in the document — is body
//! content. A document without a block splits into an empty metadata map
//! and the full original text.
//!
//! Parsing is strict, not best-effort: an opened block with no closing
//! delimiter, or a payload that is not a YAML mapping, fails the whole
//! conversion.

use crate::error::MarkdownerError;
use crate::output::Metadata;

/// Split a document into (frontmatter metadata, body).
///
/// The returned body borrows from the input and excludes the delimiter
/// lines. Only called when frontmatter extraction is enabled; a cache hit
/// bypasses this entirely since the cached record already carries the final
/// fields.
pub fn split(document: &str) -> Result<(Metadata, &str), MarkdownerError> {
    let Some(after_open) = strip_open_delimiter(document) else {
        return Ok((Metadata::new(), document));
    };

    // Walk the remaining lines looking for the closing delimiter, tracking
    // how many bytes of `after_open` each line consumes.
    let mut consumed = 0usize;
    let mut payload_end = None;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == "---" {
            payload_end = Some((consumed, consumed + line.len()));
            break;
        }
        consumed += line.len();
    }

    let Some((payload_end, body_start)) = payload_end else {
        return Err(MarkdownerError::UnterminatedFrontmatter);
    };

    let payload = &after_open[..payload_end];
    let body = &after_open[body_start..];

    if payload.trim().is_empty() {
        return Ok((Metadata::new(), body));
    }

    let metadata: Metadata = serde_yaml::from_str(payload)
        .map_err(|e| MarkdownerError::Frontmatter {
            detail: e.to_string(),
        })?;

    Ok((metadata, body))
}

/// If the document opens with a `---` delimiter line, return the text after
/// that line.
fn strip_open_delimiter(document: &str) -> Option<&str> {
    let rest = document.strip_prefix("---")?;
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}
