//! `wysiwyg render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use super::DocumentArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    document: DocumentArgs,

    /// Write HTML to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output_file: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let result = self.document.render()?;

        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        if let Some(path) = self.output_file {
            std::fs::write(&path, &result.html)?;
            output.success(&format!("Wrote {}", path.display()));
        } else {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(result.html.as_bytes())?;
            stdout.write_all(b"\n")?;
            stdout.flush()?;
        }

        Ok(())
    }
}
