//! `tocnav check` command implementation.

use clap::Args;
use tocnav_outline::Transformer;

use super::args::CommonArgs;
use super::report_summary;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print the generated navigation to stdout.
    #[arg(long)]
    print: bool,
}

impl CheckArgs {
    /// Execute the check command without writing any file.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or parsing fails, or if `--strict`
    /// finds an entry without a filename.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.common.load_config(None)?;
        let input = &config.toc_resolved.input;
        output.info(&format!("Input: {}", input.display()));

        let transformer = Transformer::new(config.outline_options(), config.list.marker_char());
        let navigation = transformer.transform_file(input)?;
        let summary = navigation.summary();

        report_summary(&output, &summary, &config.outline.placeholder);
        if self.print {
            output.navigation(&navigation.text);
        }
        output.success("Table of contents is valid");
        Ok(())
    }
}
