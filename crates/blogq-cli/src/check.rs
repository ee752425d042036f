//! # Check Subcommand
//!
//! `blogq check <path>` — load a posts file, run the structural pass and
//! the semantic rules, print every diagnostic and exit nonzero if any of
//! them is an error.
//!
//! ## Pipeline
//!
//! 1. Read and parse the file (JSON, or YAML by extension).
//! 2. Require the `{ "posts": [ ... ] }` envelope.
//! 3. Load the schema, report its first violation (if any).
//! 4. Run the semantic rules over the posts.
//!
//! Steps 1–3 can fail fatally. A fatal failure is reported as a single
//! `ERROR <file> <path>: <reason>` diagnostic and nothing else; it never
//! escapes [`check_file`].

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, ValueEnum};

use blogq_core::{exit_code, load_document, normalize_posts, semantic_diagnostics, Diagnostic};
use blogq_schema::{schema_diagnostics, SchemaSource};

/// Arguments for the `blogq check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the posts file (`.json`, or `.yaml`/`.yml`).
    pub path: PathBuf,

    /// Validate against this schema file instead of the bundled one.
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Output format for diagnostics.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl CheckArgs {
    fn schema_source(&self) -> SchemaSource {
        match &self.schema {
            Some(path) => SchemaSource::File(path.clone()),
            None => SchemaSource::Bundled,
        }
    }
}

/// How diagnostics are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `SEVERITY slug pointer: message` line per diagnostic.
    #[default]
    Text,
    /// A JSON array of diagnostic objects.
    Json,
}

/// Outcome of checking one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Diagnostics in report order: schema first, then semantic.
    pub diagnostics: Vec<Diagnostic>,
    /// True when the run aborted and `diagnostics` holds the single
    /// synthetic `<file>` error.
    pub fatal: bool,
}

impl CheckReport {
    /// 1 if any diagnostic is an error (fatal runs always are), else 0.
    pub fn exit_code(&self) -> u8 {
        exit_code(&self.diagnostics)
    }
}

/// Run the full pipeline for one file.
pub fn check_file(path: &Path, schema: &SchemaSource) -> CheckReport {
    match collect_diagnostics(path, schema) {
        Ok(diagnostics) => {
            tracing::info!(
                path = %path.display(),
                diagnostics = diagnostics.len(),
                errors = diagnostics.iter().filter(|d| d.is_error()).count(),
                "check complete"
            );
            CheckReport {
                diagnostics,
                fatal: false,
            }
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "check aborted: {e:#}");
            CheckReport {
                diagnostics: vec![Diagnostic::fatal(path.display(), e)],
                fatal: true,
            }
        }
    }
}

fn collect_diagnostics(path: &Path, schema: &SchemaSource) -> Result<Vec<Diagnostic>> {
    let document = load_document(path)?;
    let posts = normalize_posts(&document)?;
    tracing::debug!(posts = posts.len(), "normalized posts document");

    let validator = schema.load()?;
    let mut diagnostics = schema_diagnostics(&validator, &document);
    diagnostics.extend(semantic_diagnostics(posts));
    Ok(diagnostics)
}

/// Write diagnostics one per line.
pub fn render_text<W: Write>(diagnostics: &[Diagnostic], out: &mut W) -> io::Result<()> {
    for d in diagnostics {
        writeln!(out, "{d}")?;
    }
    Ok(())
}

/// Write diagnostics as a pretty-printed JSON array followed by a newline.
pub fn render_json<W: Write>(diagnostics: &[Diagnostic], out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, diagnostics)?;
    writeln!(out)?;
    Ok(())
}

/// Render a report in the requested format.
pub fn render<W: Write>(report: &CheckReport, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Text => render_text(&report.diagnostics, out)?,
        OutputFormat::Json => render_json(&report.diagnostics, out)?,
    }
    out.flush()?;
    Ok(())
}

/// Execute the check subcommand; returns the process exit code.
///
/// Only a failure to write to stdout is returned as an error.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let report = check_file(&args.path, &args.schema_source());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&report, args.format, &mut out)?;
    Ok(report.exit_code())
}
