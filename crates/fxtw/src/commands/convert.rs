//! `fxtw convert` command implementation.

use clap::Args;

use super::{CommonArgs, FileReport, process, report_diagnostics};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Report changes without writing files.
    #[arg(long)]
    dry_run: bool,
}

/// Totals over one convert run.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    files: usize,
    changed_files: usize,
    converted_tags: usize,
    skipped: usize,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or a template can't be read
    /// or written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config()?;
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }

        let reports = process(&config)?;
        let summary = apply(&reports, self.dry_run, &output)?;

        let verb = if self.dry_run { "Would convert" } else { "Converted" };
        output.success(&format!(
            "{verb} {} tag(s) in {} of {} file(s)",
            summary.converted_tags, summary.changed_files, summary.files
        ));
        if summary.skipped > 0 {
            output.warning(&format!(
                "{} directive(s) left unconverted",
                summary.skipped
            ));
        }
        Ok(())
    }
}

/// Write changed documents unless `dry_run` is set.
fn apply(reports: &[FileReport], dry_run: bool, output: &Output) -> Result<Summary, CliError> {
    let mut summary = Summary {
        files: reports.len(),
        ..Summary::default()
    };

    for report in reports {
        report_diagnostics(output, report);
        summary.skipped += report.rewrite.diagnostics.len();
        if !report.rewrite.is_changed() {
            continue;
        }
        if !dry_run {
            report.document.write(&report.rewrite.html)?;
        }
        tracing::info!(
            path = %report.document.path.display(),
            tags = report.rewrite.converted_tags,
            "Converted template"
        );
        output.info(&format!("  {}", report.document.path.display()));
        summary.changed_files += 1;
        summary.converted_tags += report.rewrite.converted_tags;
    }
    Ok(summary)
}
