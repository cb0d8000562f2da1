//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod convert;

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Args;
use fxtw_config::{CliSettings, Config};
use fxtw_fs::{Document, Scanner};
use fxtw_rewrite::{Rewrite, Rewriter};

use crate::error::CliError;
use crate::output::Output;

pub(crate) use check::CheckArgs;
pub(crate) use convert::ConvertArgs;

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Directories or HTML files to process (overrides config root).
    paths: Vec<PathBuf>,

    /// Prefix for generated classes (overrides config).
    #[arg(short, long, env = "FXTW_PREFIX")]
    prefix: Option<String>,

    /// Path to configuration file (default: auto-discover fxtw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (log every skipped directive).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            prefix: self.prefix.clone(),
            roots: (!self.paths.is_empty()).then(|| self.paths.clone()),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// A template together with its rewritten form.
pub(crate) struct FileReport {
    pub document: Document,
    pub rewrite: Rewrite,
}

/// Rewrite every template below the configured roots in memory.
///
/// A file reachable from several roots is processed once.
fn process(config: &Config) -> Result<Vec<FileReport>, CliError> {
    let rewriter = Rewriter::with_prefix(&config.prefix);
    let mut seen = HashSet::new();
    let mut reports = Vec::new();

    for root in &config.roots {
        let scanner = Scanner::new(root.clone(), config.exclude.clone());
        for path in scanner.scan()? {
            if !seen.insert(path.clone()) {
                continue;
            }
            let document = Document::read(&path)?;
            let rewrite = rewriter.rewrite(&document.text);
            tracing::debug!(
                path = %path.display(),
                converted = rewrite.converted_tags,
                skipped = rewrite.diagnostics.len(),
                "Processed template"
            );
            reports.push(FileReport { document, rewrite });
        }
    }
    Ok(reports)
}

/// Print the directives left in place for one file.
fn report_diagnostics(output: &Output, report: &FileReport) {
    if report.rewrite.diagnostics.is_empty() {
        return;
    }
    output.warning(&format!(
        "{}: {} directive(s) left unconverted",
        report.document.path.display(),
        report.rewrite.diagnostics.len()
    ));
    for diagnostic in &report.rewrite.diagnostics {
        output.detail(&diagnostic.to_string());
    }
}
