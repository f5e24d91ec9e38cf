//! Integration tests for markdowner.
//!
//! These tests render real fixture documents from `./tests/fixtures/` and
//! assert on the produced HTML and result records. Everything runs offline;
//! there is no gating.

use markdowner::{
    fingerprint, render, Cache, CacheError, MarkdownerError, MemoryCache, Pass, Rendered,
    RenderOptions,
};
use markdowner::pulldown_cmark::Event;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// Extra pass that counts how many times it ran.
#[derive(Default)]
struct CountingPass {
    runs: AtomicUsize,
}

impl CountingPass {
    fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl Pass for CountingPass {
    fn name(&self) -> &str {
        "counting"
    }

    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Result<Vec<Event<'a>>, MarkdownerError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(events)
    }
}

/// Extra pass that rewrites `:tada:` text to `:sparkles:` — proves extra
/// passes run before the built-in emoji pass.
struct TadaToSparkles;

impl Pass for TadaToSparkles {
    fn name(&self) -> &str {
        "tada-to-sparkles"
    }

    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Result<Vec<Event<'a>>, MarkdownerError> {
        Ok(events
            .into_iter()
            .map(|event| match event {
                Event::Text(t) if t.contains(":tada:") => {
                    Event::Text(t.replace(":tada:", ":sparkles:").into())
                }
                other => other,
            })
            .collect())
    }
}

/// Cache that fails every operation — exercises the degradation path.
struct BrokenCache;

#[async_trait::async_trait]
impl Cache for BrokenCache {
    async fn get(&self, _key: &str) -> Result<Option<Rendered>, CacheError> {
        Err(CacheError::Unavailable("backend offline".into()))
    }

    async fn put(&self, _key: &str, _value: &Rendered) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("backend offline".into()))
    }
}

// ── Heading anchors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn adds_dom_ids_to_headings() {
    let record = render(&fixture("basic.md"), &RenderOptions::default())
        .await
        .expect("renders");
    assert!(
        record.content.contains(r#"<h2 id="basic-fixture">"#),
        "got: {}",
        record.content
    );
}

#[tokio::test]
async fn wraps_headings_in_self_links() {
    let record = render(&fixture("basic.md"), &RenderOptions::default())
        .await
        .expect("renders");
    assert!(
        record
            .content
            .contains(r##"<a href="#basic-fixture">Basic Fixture</a>"##),
        "got: {}",
        record.content
    );
}

// ── Link normalisation ───────────────────────────────────────────────────────

#[tokio::test]
async fn handles_markdown_links() {
    let source = fixture("basic.md");
    assert!(source.contains("[link](https://link.com)"));

    let record = render(&source, &RenderOptions::default())
        .await
        .expect("renders");
    assert!(
        record
            .content
            .contains(r#"<a href="https://link.com">link</a>"#),
        "got: {}",
        record.content
    );
}

#[tokio::test]
async fn handles_shortcut_reference_links() {
    let source = fixture("footnotes.md");
    assert!(source.contains("[link]"));

    let record = render(&source, &RenderOptions::default())
        .await
        .expect("renders");
    assert!(
        record
            .content
            .contains(r#"<a href="http://example.com">link</a>"#),
        "got: {}",
        record.content
    );
}

#[tokio::test]
async fn handles_full_reference_links() {
    let source = fixture("footnotes.md");
    assert!(source.contains("[full reference link][full]"));

    let record = render(&source, &RenderOptions::default())
        .await
        .expect("renders");
    assert!(
        record
            .content
            .contains(r#"<a href="http://full.com">full reference link</a>"#),
        "got: {}",
        record.content
    );
}

// ── Emoji ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn substitutes_emoji_shortcodes() {
    let source = fixture("emoji.md");
    assert!(source.contains(":tada:"));

    let record = render(&source, &RenderOptions::default())
        .await
        .expect("renders");
    assert!(record.content.contains('🎉'), "got: {}", record.content);
}

#[tokio::test]
async fn does_not_mess_with_existing_emoji() {
    let source = fixture("emoji.md");
    assert!(source.contains('✨'));

    let record = render(&source, &RenderOptions::default())
        .await
        .expect("renders");
    assert!(record.content.contains('✨'), "got: {}", record.content);
}

// ── Syntax highlighting ──────────────────────────────────────────────────────

#[tokio::test]
async fn tags_fenced_code_with_language_class() {
    let record = render(&fixture("code.md"), &RenderOptions::default())
        .await
        .expect("renders");
    assert!(
        record.content.contains(r#"<code class="language-js">"#),
        "got: {}",
        record.content
    );
}

// ── Frontmatter ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn does_not_parse_frontmatter_by_default() {
    let record = render(&fixture("frontmatter.md"), &RenderOptions::default())
        .await
        .expect("renders");
    assert!(record.metadata.is_empty());
    assert!(record.get("title").is_none());
    assert!(!record.content.is_empty());
}

#[tokio::test]
async fn parses_frontmatter_when_enabled() {
    let options = RenderOptions::builder().frontmatter(true).build();
    let record = render(&fixture("frontmatter.md"), &options)
        .await
        .expect("renders");

    let expect_str = |key: &str, value: &str| {
        assert_eq!(
            record.get(key),
            Some(&serde_yaml::Value::String(value.to_string())),
            "field {key}"
        );
    };
    expect_str("title", "Team post: The new database");
    expect_str("author", "HashimotoYT");
    expect_str("date", "2018-09-12");

    // The block must not leak into the rendered body.
    assert!(!record.content.contains("HashimotoYT"), "got: {}", record.content);
    assert!(record.content.contains("<h1"), "got: {}", record.content);
}

#[tokio::test]
async fn metadata_surfaces_beside_content_in_json() {
    let options = RenderOptions::builder().frontmatter(true).build();
    let record = render(&fixture("frontmatter.md"), &options)
        .await
        .expect("renders");

    let json = serde_json::to_value(&record).expect("serialises");
    assert_eq!(json["author"], "HashimotoYT");
    assert!(json["content"].as_str().expect("content is a string").contains("<h1"));
}

// ── Table of contents ────────────────────────────────────────────────────────

#[tokio::test]
async fn inserts_table_of_contents_when_enabled() {
    let source = fixture("toc.md");
    // The phrase must come from the pass, not the document.
    assert!(!source.contains("Table of Contents"));

    let options = RenderOptions::builder().table_of_contents(true).build();
    let record = render(&source, &options).await.expect("renders");

    assert!(record.content.contains("Table of Contents"), "got: {}", record.content);
    assert!(record.content.contains("<ul>"), "got: {}", record.content);
    assert!(
        record.content.contains(r##"<a href="#bug-fixes">Bug Fixes</a>"##),
        "got: {}",
        record.content
    );
}

#[tokio::test]
async fn omits_table_of_contents_by_default() {
    let record = render(&fixture("toc.md"), &RenderOptions::default())
        .await
        .expect("renders");
    assert!(!record.content.contains("Table of Contents"));
}

// ── Fingerprinting ───────────────────────────────────────────────────────────

#[test]
fn fingerprint_is_deterministic() {
    let doc = fixture("basic.md");
    let options = RenderOptions::builder().table_of_contents(true).build();
    assert_eq!(fingerprint(&doc, &options), fingerprint(&doc, &options));
}

#[test]
fn fingerprint_ignores_the_cache_field() {
    let doc = fixture("basic.md");
    let plain = RenderOptions::default();
    let cached = RenderOptions::builder()
        .cache(Arc::new(MemoryCache::new()))
        .build();
    assert_eq!(fingerprint(&doc, &plain), fingerprint(&doc, &cached));
}

#[test]
fn fingerprint_default_equivalence() {
    let doc = fixture("basic.md");
    let implicit = RenderOptions::default();
    let explicit = RenderOptions::builder()
        .frontmatter(false)
        .table_of_contents(false)
        .build();
    assert_eq!(fingerprint(&doc, &implicit), fingerprint(&doc, &explicit));
}

// ── Idempotence ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn rendering_twice_is_byte_identical() {
    let doc = fixture("toc.md");
    let options = RenderOptions::builder().table_of_contents(true).build();

    let first = render(&doc, &options).await.expect("renders");
    let second = render(&doc, &options).await.expect("renders");
    assert_eq!(first.content, second.content);
}

// ── Caching ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn cache_hit_skips_the_pipeline() {
    let counter = Arc::new(CountingPass::default());
    let cache = Arc::new(MemoryCache::new());
    let options = RenderOptions::builder()
        .extra_pass(counter.clone())
        .cache(cache.clone())
        .build();
    let doc = fixture("basic.md");

    let first = render(&doc, &options).await.expect("renders");
    assert_eq!(counter.runs(), 1);
    // The write must have landed before the first call resolved.
    assert_eq!(cache.len().await, 1);

    let second = render(&doc, &options).await.expect("renders");
    assert_eq!(counter.runs(), 1, "second call must be served from cache");
    assert_eq!(first, second);
}

#[tokio::test]
async fn cache_hit_bypasses_frontmatter_parsing() {
    let cache = Arc::new(MemoryCache::new());
    let options = RenderOptions::builder()
        .frontmatter(true)
        .cache(cache.clone())
        .build();
    let doc = fixture("frontmatter.md");

    let first = render(&doc, &options).await.expect("renders");
    let second = render(&doc, &options).await.expect("renders");

    // The cached record is authoritative: metadata comes back with it.
    assert_eq!(second, first);
    assert_eq!(
        second.get("author"),
        Some(&serde_yaml::Value::String("HashimotoYT".into()))
    );
}

#[tokio::test]
async fn distinct_options_do_not_share_cache_entries() {
    let cache = Arc::new(MemoryCache::new());
    let doc = fixture("toc.md");

    let with_toc = RenderOptions::builder()
        .table_of_contents(true)
        .cache(cache.clone())
        .build();
    let without_toc = RenderOptions::builder().cache(cache.clone()).build();

    let toc_record = render(&doc, &with_toc).await.expect("renders");
    let plain_record = render(&doc, &without_toc).await.expect("renders");

    assert_eq!(cache.len().await, 2);
    assert!(toc_record.content.contains("Table of Contents"));
    assert!(!plain_record.content.contains("Table of Contents"));
}

#[tokio::test]
async fn broken_cache_degrades_to_recompute() {
    let options = RenderOptions::builder().cache(Arc::new(BrokenCache)).build();
    let record = render(&fixture("basic.md"), &options)
        .await
        .expect("a broken cache must not fail the conversion");
    assert!(record.content.contains(r#"<h2 id="basic-fixture">"#));
}

// ── Extra passes ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn extra_passes_run_before_built_ins() {
    let options = RenderOptions::builder()
        .extra_pass(Arc::new(TadaToSparkles))
        .build();
    let record = render(&fixture("emoji.md"), &options)
        .await
        .expect("renders");

    // The extra pass rewrote the shortcode before the emoji pass saw it.
    assert!(!record.content.contains('🎉'), "got: {}", record.content);
    assert!(record.content.contains('✨'), "got: {}", record.content);
}

// ── Error propagation ────────────────────────────────────────────────────────

#[tokio::test]
async fn malformed_frontmatter_fails_the_conversion() {
    let doc = "---\ntitle: [unclosed\n---\n\nbody\n";
    let options = RenderOptions::builder().frontmatter(true).build();
    let err = render(doc, &options).await.expect_err("must fail");
    assert!(matches!(err, MarkdownerError::Frontmatter { .. }), "got: {err}");
}

#[tokio::test]
async fn failing_extra_pass_fails_the_conversion() {
    struct Failing;
    impl Pass for Failing {
        fn name(&self) -> &str {
            "failing"
        }
        fn apply<'a>(
            &self,
            _events: Vec<Event<'a>>,
        ) -> Result<Vec<Event<'a>>, MarkdownerError> {
            Err(MarkdownerError::pass("failing", "deliberate"))
        }
    }

    let options = RenderOptions::builder().extra_pass(Arc::new(Failing)).build();
    let err = render("text", &options).await.expect_err("must fail");
    assert!(matches!(err, MarkdownerError::Pass { .. }));
}
