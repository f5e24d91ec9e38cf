//! Configuration types for Markdown-to-HTML conversion.
//!
//! All conversion behaviour is controlled through [`RenderOptions`], built
//! via [`RenderOptions::builder()`] or [`RenderOptions::default()`]. The
//! options value is normalised exactly once per conversion: unspecified
//! fields take the documented defaults, and the caller's value is never
//! mutated afterwards. Whether the table-of-contents pass runs is derived
//! from `table_of_contents` at composition time rather than stored as a
//! separate field.

use crate::cache::Cache;
use crate::pipeline::Pass;
use std::fmt;
use std::sync::Arc;

/// Configuration for one Markdown conversion.
///
/// # Example
/// ```rust
/// use markdowner::RenderOptions;
///
/// let options = RenderOptions::builder()
///     .frontmatter(true)
///     .table_of_contents(true)
///     .build();
/// assert!(options.frontmatter);
/// ```
#[derive(Clone, Default)]
pub struct RenderOptions {
    /// Extract a leading YAML frontmatter block before rendering and surface
    /// its fields on the result record. Default: false.
    pub frontmatter: bool,

    /// Insert a "Table of Contents" heading and link list built from the
    /// document's headings. Default: false.
    pub table_of_contents: bool,

    /// Caller-supplied passes, run before every built-in pass in the order
    /// given here. Default: empty.
    ///
    /// An extra pass sees the raw parse of the document body, before heading
    /// IDs, autolinks, emoji, or highlighting have been applied.
    pub extra_passes: Vec<Arc<dyn Pass>>,

    /// Cache backend. When set, a conversion first consults the cache by
    /// fingerprint and stores its result on a miss. The reference itself is
    /// excluded from fingerprinting. Default: absent.
    pub cache: Option<Arc<dyn Cache>>,
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("frontmatter", &self.frontmatter)
            .field("table_of_contents", &self.table_of_contents)
            .field(
                "extra_passes",
                &self.extra_passes.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("cache", &self.cache.as_ref().map(|_| "<dyn Cache>"))
            .finish()
    }
}

impl RenderOptions {
    /// Create a new builder for `RenderOptions`.
    pub fn builder() -> RenderOptionsBuilder {
        RenderOptionsBuilder {
            options: Self::default(),
        }
    }
}

/// Builder for [`RenderOptions`].
#[derive(Debug)]
pub struct RenderOptionsBuilder {
    options: RenderOptions,
}

impl RenderOptionsBuilder {
    pub fn frontmatter(mut self, v: bool) -> Self {
        self.options.frontmatter = v;
        self
    }

    pub fn table_of_contents(mut self, v: bool) -> Self {
        self.options.table_of_contents = v;
        self
    }

    /// Append one caller-supplied pass.
    pub fn extra_pass(mut self, pass: Arc<dyn Pass>) -> Self {
        self.options.extra_passes.push(pass);
        self
    }

    /// Replace the whole caller-supplied pass list.
    pub fn extra_passes(mut self, passes: Vec<Arc<dyn Pass>>) -> Self {
        self.options.extra_passes = passes;
        self
    }

    pub fn cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.options.cache = Some(cache);
        self
    }

    /// Finish the builder.
    ///
    /// There are no invalid combinations of these fields, so building never
    /// fails.
    pub fn build(self) -> RenderOptions {
        self.options
    }
}
