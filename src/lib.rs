//! # markdowner
//!
//! Convert Markdown text to rendered HTML through a configurable pipeline
//! of transformation passes, with an optional content-addressed cache to
//! skip recomputation for previously seen input.
//!
//! ## Pipeline Overview
//!
//! ```text
//! document
//!  │
//!  ├─ 1. Fingerprint  SHA-256 over document + canonical options
//!  ├─ 2. Cache        lookup by fingerprint (return hit, skip the rest)
//!  ├─ 3. Frontmatter  optional YAML metadata extraction
//!  ├─ 4. Compose      [extra passes…, toc?, heading-ids, autolinks,
//!  │                   inline-links, emoji, highlight]
//!  ├─ 5. Execute      event-stream passes in sequence, serialise to HTML
//!  └─ 6. Store        awaited cache write, then return the result record
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use markdowner::{render, RenderOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = RenderOptions::builder().frontmatter(true).build();
//!     let record = render("# Hello :tada:", &options).await?;
//!     println!("{}", record.content);
//!     Ok(())
//! }
//! ```
//!
//! ## Caching
//!
//! Hand any [`Cache`] implementation to the options and identical
//! (document, options) pairs are computed once:
//!
//! ```rust,no_run
//! use markdowner::{render, MemoryCache, RenderOptions};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = Arc::new(MemoryCache::new());
//! let options = RenderOptions::builder().cache(cache).build();
//! let first = render("# Hi", &options).await?;   // computed
//! let second = render("# Hi", &options).await?;  // served from cache
//! assert_eq!(first, second);
//! # Ok(())
//! # }
//! ```
//!
//! A cache backend that fails is logged and bypassed; a conversion never
//! fails because of its cache.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `markdowner` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! markdowner = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod cache;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod frontmatter;
pub mod output;
pub mod pipeline;
pub mod render;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use cache::{Cache, MemoryCache};
pub use config::{RenderOptions, RenderOptionsBuilder};
pub use error::{CacheError, MarkdownerError};
pub use fingerprint::fingerprint;
pub use output::{Metadata, Rendered};
pub use pipeline::{compose, slugify, Pass, Pipeline};
pub use render::{render, render_sync, render_to_file};

// Extra passes are written against this crate's event types; re-export the
// engine so downstream code can name them without a separate version pin.
pub use pulldown_cmark;
