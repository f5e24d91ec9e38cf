//! CLI binary for markdowner.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `RenderOptions` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use markdowner::{render, render_to_file, RenderOptions};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Render to stdout
  markdowner README.md

  # Render to a file
  markdowner post.md -o post.html

  # Extract frontmatter and emit the full record as JSON
  markdowner --frontmatter --json post.md

  # Insert a generated table of contents
  markdowner --toc handbook.md -o handbook.html

  # Read from stdin
  cat notes.md | markdowner -
"#;

/// Render Markdown files to HTML.
#[derive(Parser, Debug)]
#[command(
    name = "markdowner",
    version,
    about = "Render Markdown to HTML with heading anchors, emoji, syntax highlighting, and more",
    long_about = "Render Markdown documents to HTML through a configurable pass pipeline: \
heading IDs and self-links, inline-link normalisation, emoji shortcodes, syntax highlighting, \
optional frontmatter extraction and table-of-contents generation.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown file to render, or '-' for stdin.
    input: String,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long, env = "MARKDOWNER_OUTPUT")]
    output: Option<PathBuf>,

    /// Extract a leading YAML frontmatter block.
    #[arg(short, long, env = "MARKDOWNER_FRONTMATTER")]
    frontmatter: bool,

    /// Insert a generated "Table of Contents" section.
    #[arg(short, long, env = "MARKDOWNER_TOC")]
    toc: bool,

    /// Output the full result record (metadata + content) as JSON.
    #[arg(long, env = "MARKDOWNER_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MARKDOWNER_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MARKDOWNER_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Read input ───────────────────────────────────────────────────────
    let document = if cli.input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(&cli.input)
            .await
            .with_context(|| format!("Failed to read '{}'", cli.input))?
    };

    // ── Build options ────────────────────────────────────────────────────
    let options = RenderOptions::builder()
        .frontmatter(cli.frontmatter)
        .table_of_contents(cli.toc)
        .build();

    // ── Render ───────────────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        let record = render_to_file(&document, output_path, &options)
            .await
            .context("Rendering failed")?;

        if !cli.quiet {
            eprintln!(
                "{} bytes of HTML  →  {}",
                record.content.len(),
                output_path.display()
            );
        }
        return Ok(());
    }

    let record = render(&document, &options)
        .await
        .context("Rendering failed")?;

    if cli.json {
        let json =
            serde_json::to_string_pretty(&record).context("Failed to serialise record")?;
        println!("{json}");
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(record.content.as_bytes())
            .context("Failed to write to stdout")?;
        if !record.content.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }

    Ok(())
}
