//! `wysiwyg check` command implementation.

use clap::Args;

use super::DocumentArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    document: DocumentArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Fails when rendering produced any warning, so the command can gate CI.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let result = self.document.render()?;

        if result.warnings.is_empty() {
            output.success("No warnings");
            return Ok(());
        }

        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
        Err(CliError::Validation(format!(
            "{} warning(s) reported",
            result.warnings.len()
        )))
    }
}
