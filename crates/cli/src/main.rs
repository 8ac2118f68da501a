//! `rolegen` — regenerate or drift-check the accessibility role header.
//!
//! With no arguments the header for the default IDL path is printed to
//! stdout, which is handy for eyeballing a change. Builds use `--output`;
//! CI uses `--output ... --check`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use rolegen_core::{
    DEFAULT_INPUT, Freshness, Layout, WriteOutcome, check_up_to_date, generate_with_layout,
    load_layout_from_str, render_file, write_if_changed,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "rolegen",
    version,
    about = "Generate the role enum header from its IDL declaration"
)]
struct Cli {
    /// IDL file declaring `const unsigned long ROLE_<NAME> = <N>;` constants.
    #[arg(long, short, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Write the header to this file instead of stdout. The file is replaced
    /// atomically and left untouched when already up to date.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Verify that OUTPUT matches the IDL without writing (exit 1 if not). For CI.
    #[arg(long, requires = "output")]
    check: bool,

    /// JSON file overriding the header layout (prefix, guard, namespaces, ...).
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Log progress to stderr. `RUST_LOG` takes precedence when set.
    #[arg(long, short)]
    verbose: bool,
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let layout = match cli.layout.as_deref() {
        Some(path) => load_layout(path)?,
        None => Layout::default(),
    };
    debug!(?layout, "resolved header layout");

    match cli.output.as_deref() {
        None => cmd_print(&cli.input, &layout),
        Some(output) if cli.check => cmd_check(&cli.input, output, &layout),
        Some(output) => cmd_write(&cli.input, output, &layout),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    // stdout may carry the header; logs always go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_print(input: &Path, layout: &Layout) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    generate_with_layout(&mut out, input, layout)
        .with_context(|| format!("generating header from {}", input.display()))?;
    Ok(())
}

fn cmd_write(input: &Path, output: &Path, layout: &Layout) -> Result<()> {
    let header = render(input, layout)?;
    let outcome = write_if_changed(output, &header)
        .with_context(|| format!("writing {}", output.display()))?;
    let status = match outcome {
        WriteOutcome::Written => "generated",
        WriteOutcome::Unchanged => "unchanged",
    };
    eprintln!("{}: {}", status, output.display());
    Ok(())
}

fn cmd_check(input: &Path, output: &Path, layout: &Layout) -> Result<()> {
    let header = render(input, layout)?;
    let freshness = check_up_to_date(output, &header)
        .with_context(|| format!("checking {}", output.display()))?;
    match freshness {
        Freshness::Fresh => {
            eprintln!("up to date: {}", output.display());
            Ok(())
        }
        Freshness::Stale => {
            eprintln!(
                "out of date: {} (regenerate from {})",
                output.display(),
                input.display()
            );
            process::exit(1);
        }
        Freshness::Missing => {
            eprintln!("missing: {}", output.display());
            process::exit(1);
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn render(input: &Path, layout: &Layout) -> Result<String> {
    render_file(input, layout).with_context(|| format!("generating header from {}", input.display()))
}

fn load_layout(path: &Path) -> Result<Layout> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read layout file {}", path.display()))?;
    load_layout_from_str(&text).with_context(|| format!("invalid layout file {}", path.display()))
}
