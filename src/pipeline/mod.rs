//! The transformation pipeline: pass contract, composition, and execution.
//!
//! The intermediate representation is the `pulldown-cmark` event stream. A
//! [`Pass`] is one event-stream transform; the composer assembles an ordered
//! pass list from the effective options, and the executor parses the body,
//! threads the events through every pass in sequence, and serialises the
//! final stream to HTML.
//!
//! ## Data Flow
//!
//! ```text
//! body ──▶ parse ──▶ [extra passes…] ──▶ toc? ──▶ heading-ids ──▶ autolink
//!           (events)                                                │
//!   HTML ◀── serialise ◀── highlight ◀── emoji ◀── inline-links ◀──┘
//! ```
//!
//! Ordering is load-bearing: caller passes see the raw structure first, the
//! ToC pass inserts headings that the ID pass must still visit, the autolink
//! pass reads IDs the ID pass assigned, and serialisation is always the
//! terminal stage. [`compose`] owns this order; nothing else may reorder
//! passes.
//!
//! A [`Pipeline`] is built fresh per conversion from the options of that
//! conversion. There is no process-wide pipeline: an executor composed for a
//! ToC-enabled call is dropped with the call and can never serve a non-ToC
//! call by accident.

pub mod emoji;
pub mod headings;
pub mod highlight;
pub mod links;
pub mod toc;

use crate::config::RenderOptions;
use crate::error::MarkdownerError;
use pulldown_cmark::{html, Event, Options, Parser};
use std::sync::Arc;

pub use emoji::EmojiPass;
pub use headings::{slugify, HeadingAutolinkPass, HeadingIdPass, Slugger};
pub use highlight::HighlightPass;
pub use links::InlineLinksPass;
pub use toc::TocPass;

/// One transformation step over the structured document representation.
///
/// Passes are pure event-stream transforms: they receive the previous
/// stage's events and return the next stage's. A pass failure aborts the
/// whole conversion.
pub trait Pass: Send + Sync {
    /// Stable identity of the pass. Extra-pass names are folded into the
    /// conversion fingerprint, so a name should change when behaviour does.
    fn name(&self) -> &str;

    /// Transform the event stream.
    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Result<Vec<Event<'a>>, MarkdownerError>;
}

/// Parser extensions enabled for every conversion.
fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Assemble the ordered pass sequence for the given effective options.
///
/// Purely declarative: no execution happens here. Built-in order, after any
/// caller-supplied passes:
///
/// 1. caller `extra_passes`, in caller order
/// 2. table-of-contents generation — iff `table_of_contents`
/// 3. heading-ID assignment
/// 4. heading autolink wrapping (reads the IDs from 3)
/// 5. inline-link normalisation
/// 6. emoji shortcode substitution
/// 7. syntax-highlighting annotation
///
/// HTML serialisation is the executor's terminal stage and always runs last.
pub fn compose(options: &RenderOptions) -> Vec<Arc<dyn Pass>> {
    let mut passes: Vec<Arc<dyn Pass>> = Vec::with_capacity(options.extra_passes.len() + 6);
    passes.extend(options.extra_passes.iter().cloned());
    if options.table_of_contents {
        passes.push(Arc::new(TocPass));
    }
    passes.push(Arc::new(HeadingIdPass));
    passes.push(Arc::new(HeadingAutolinkPass));
    passes.push(Arc::new(InlineLinksPass));
    passes.push(Arc::new(EmojiPass));
    passes.push(Arc::new(HighlightPass));
    passes
}

/// Executes a composed pass sequence over one document body.
///
/// Constructed per conversion; holds no state beyond its pass list and is
/// discarded when the conversion resolves.
pub struct Pipeline {
    passes: Vec<Arc<dyn Pass>>,
}

impl Pipeline {
    pub fn new(passes: Vec<Arc<dyn Pass>>) -> Self {
        Self { passes }
    }

    /// Names of the passes in execution order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Run the pipeline: parse, apply each pass in sequence, serialise.
    ///
    /// The parse and the passes are CPU-bound, so the work runs on the
    /// blocking pool rather than stalling the async executor.
    pub async fn execute(&self, body: &str) -> Result<String, MarkdownerError> {
        let passes = self.passes.clone();
        let body = body.to_owned();

        tokio::task::spawn_blocking(move || run(&passes, &body))
            .await
            .map_err(|e| MarkdownerError::Internal(format!("pipeline task failed: {e}")))?
    }
}

fn run(passes: &[Arc<dyn Pass>], body: &str) -> Result<String, MarkdownerError> {
    let mut events: Vec<Event<'_>> = Parser::new_ext(body, parser_options()).collect();
    for pass in passes {
        events = pass.apply(events)?;
    }

    let mut out = String::with_capacity(body.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    Ok(out)
}
