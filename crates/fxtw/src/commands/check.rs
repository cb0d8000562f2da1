//! `fxtw check` command implementation.

use clap::Args;

use super::{CommonArgs, FileReport, process, report_diagnostics};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Unconverted` if any template would be rewritten,
    /// or an error if configuration fails or a template can't be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config()?;
        let reports = process(&config)?;

        for report in &reports {
            report_diagnostics(&output, report);
        }

        let pending = pending(&reports);
        for report in &pending {
            output.info(&format!(
                "{}: {} tag(s) to convert",
                report.document.path.display(),
                report.rewrite.converted_tags
            ));
        }

        if pending.is_empty() {
            output.success(&format!("{} file(s) up to date", reports.len()));
            Ok(())
        } else {
            Err(CliError::Unconverted(pending.len()))
        }
    }
}

/// Reports whose document would change on conversion.
fn pending(reports: &[FileReport]) -> Vec<&FileReport> {
    reports.iter().filter(|r| r.rewrite.is_changed()).collect()
}
