//! Error types for the markdowner library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`MarkdownerError`] — **Fatal**: the conversion cannot produce a result
//!   (malformed frontmatter, a transformation pass failed). Returned as
//!   `Err(MarkdownerError)` from the top-level `render*` functions.
//!
//! * [`CacheError`] — **Non-fatal**: the cache backend misbehaved. A cache
//!   failure never fails a conversion; the orchestrator logs it and falls
//!   back to a full recompute. A miss is *not* an error at all — the cache
//!   contract signals it as `Ok(None)`.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the markdowner library.
///
/// Cache-layer failures use [`CacheError`] and are swallowed by the
/// orchestrator rather than propagated here.
#[derive(Debug, Error)]
pub enum MarkdownerError {
    // ── Frontmatter errors ────────────────────────────────────────────────
    /// A frontmatter block was present but could not be parsed as a YAML
    /// mapping. Frontmatter parsing is not best-effort: a broken block is a
    /// broken document.
    #[error("Frontmatter block is not a valid YAML mapping: {detail}")]
    Frontmatter { detail: String },

    /// A frontmatter block was opened with `---` but never closed.
    #[error("Frontmatter block starting at line 1 has no closing '---' delimiter")]
    UnterminatedFrontmatter,

    // ── Pipeline errors ───────────────────────────────────────────────────
    /// A transformation pass failed. The whole conversion is aborted; no
    /// partial output is returned.
    #[error("Transformation pass '{pass}' failed: {detail}")]
    Pass { pass: String, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output HTML file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MarkdownerError {
    /// Construct a [`MarkdownerError::Pass`] for the named pass.
    pub fn pass(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Pass {
            pass: name.into(),
            detail: detail.into(),
        }
    }
}

/// A non-fatal error from the cache capability.
///
/// Returned by [`crate::cache::Cache`] implementations for anything other
/// than a plain miss. The orchestrator treats every variant the same way:
/// log a warning, pretend no cache was configured, recompute.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backing store could not be reached or refused the operation.
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),

    /// An entry was found but could not be decoded into a result record.
    #[error("Cached record could not be decoded: {0}")]
    Decode(String),
}
