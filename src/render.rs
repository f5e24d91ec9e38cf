//! Conversion entry points.
//!
//! [`render`] is the primary API: one call takes a Markdown document and an
//! options value and resolves to a [`Rendered`] record. The stages run in a
//! fixed sequence, each awaited before the next:
//!
//! 1. fingerprint the (document, options) pair
//! 2. consult the cache — a hit returns the stored record verbatim and
//!    skips every later stage, frontmatter included
//! 3. split frontmatter from the body (if enabled)
//! 4. compose the pass sequence from the options
//! 5. execute the pipeline over the body
//! 6. merge metadata and rendered HTML into the result record
//! 7. store the record in the cache — awaited, so the write has landed by
//!    the time the caller's future resolves
//!
//! Concurrent calls share nothing but the caller-supplied cache. Two
//! simultaneous calls with the same fingerprint both compute and both
//! store; the last write wins.

use crate::cache;
use crate::config::RenderOptions;
use crate::error::MarkdownerError;
use crate::fingerprint::fingerprint;
use crate::frontmatter;
use crate::output::{Metadata, Rendered};
use crate::pipeline::{compose, Pipeline};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Convert a Markdown document to a rendered result record.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `document` — Raw Markdown source
/// * `options` — Conversion options; `&RenderOptions::default()` for none
///
/// # Errors
/// Returns `Err(MarkdownerError)` when the frontmatter block is malformed
/// or a transformation pass fails. Cache trouble never fails the call; it
/// degrades to a full recompute.
///
/// # Example
/// ```rust,no_run
/// use markdowner::{render, RenderOptions};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let record = render("# Hello", &RenderOptions::default()).await?;
/// println!("{}", record.content);
/// # Ok(())
/// # }
/// ```
pub async fn render(
    document: &str,
    options: &RenderOptions,
) -> Result<Rendered, MarkdownerError> {
    let start = Instant::now();

    // ── Step 1: Fingerprint ──────────────────────────────────────────────
    let key = fingerprint(document, options);
    debug!("fingerprint {key}");

    // ── Step 2: Cache lookup ─────────────────────────────────────────────
    // A cached record already carries its final fields, so a hit bypasses
    // frontmatter parsing and the pipeline entirely.
    if let Some(cache_ref) = options.cache.as_ref() {
        if let Some(hit) = cache::try_get(cache_ref, &key).await {
            debug!("cache hit for {key}");
            return Ok(hit);
        }
        debug!("cache miss for {key}");
    }

    // ── Step 3: Frontmatter ──────────────────────────────────────────────
    let (metadata, body) = if options.frontmatter {
        frontmatter::split(document)?
    } else {
        (Metadata::new(), document)
    };

    // ── Step 4+5: Compose and execute the pipeline ───────────────────────
    let pipeline = Pipeline::new(compose(options));
    debug!("composed pipeline: {:?}", pipeline.pass_names());
    let content = pipeline.execute(body).await?;

    // ── Step 6: Merge ────────────────────────────────────────────────────
    let record = Rendered::with_metadata(content, metadata);

    // ── Step 7: Cache store ──────────────────────────────────────────────
    if let Some(cache_ref) = options.cache.as_ref() {
        cache::try_put(cache_ref, &key, &record).await;
    }

    info!(
        "rendered {} bytes of markdown to {} bytes of HTML in {}ms",
        document.len(),
        record.content.len(),
        start.elapsed().as_millis()
    );

    Ok(record)
}

/// Convert a Markdown document and write the HTML directly to a file.
///
/// Uses atomic write (temp file + rename) to prevent partial files. Only
/// the rendered HTML is written; frontmatter metadata stays on the returned
/// record.
pub async fn render_to_file(
    document: &str,
    output_path: impl AsRef<Path>,
    options: &RenderOptions,
) -> Result<Rendered, MarkdownerError> {
    let record = render(document, options).await?;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                MarkdownerError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        }
    }

    let tmp_path = path.with_extension("html.tmp");
    tokio::fs::write(&tmp_path, &record.content)
        .await
        .map_err(|e| MarkdownerError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| MarkdownerError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(record)
}

/// Synchronous wrapper around [`render`].
///
/// Creates a temporary tokio runtime internally.
pub fn render_sync(
    document: &str,
    options: &RenderOptions,
) -> Result<Rendered, MarkdownerError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| MarkdownerError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(render(document, options))
}
