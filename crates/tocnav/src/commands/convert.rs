//! `tocnav convert` command implementation.

use std::path::PathBuf;

use clap::Args;
use tocnav_outline::Transformer;

use super::args::CommonArgs;
use super::report_summary;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Navigation file to write (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, parsing or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.common.load_config(self.output)?;
        let input = &config.toc_resolved.input;
        let nav_file = &config.toc_resolved.output;

        output.info(&format!("Input: {}", input.display()));
        output.info(&format!("Output: {}", nav_file.display()));

        let transformer = Transformer::new(config.outline_options(), config.list.marker_char());
        let summary = transformer.run(input, nav_file)?;

        report_summary(&output, &summary, &config.outline.placeholder);
        output.success(&format!("Navigation written to {}", nav_file.display()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ConvertArgs,
    }

    const TOC: &str = r#"<toc>
  <tocentry><?dbhtml filename="intro.html"?></tocentry>
  <tocentry><?dbhtml filename="setup.html"?>
    <tocentry><?dbhtml filename="setup/linux.html"?></tocentry>
  </tocentry>
  <tocentry/>
</toc>"#;

    #[test]
    fn test_convert_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("toc.xml"), TOC).unwrap();
        let config = dir.path().join("tocnav.toml");
        std::fs::write(
            &config,
            "[toc]\noutput = \"modules/ROOT/nav.adoc\"\n[outline]\nplaceholder = \"Misc\"\n",
        )
        .unwrap();

        let cli = TestCli::parse_from(["tocnav", "--config", config.to_str().unwrap()]);
        cli.args.execute().unwrap();

        let nav = std::fs::read_to_string(dir.path().join("modules/ROOT/nav.adoc")).unwrap();
        assert_eq!(
            nav,
            "* xref:intro.adoc[]\n* xref:setup.adoc[]\n** xref:setup/linux.adoc[]\n* Misc\n"
        );
    }

    #[test]
    fn test_convert_strict_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("toc.xml"), TOC).unwrap();
        let config = dir.path().join("tocnav.toml");
        std::fs::write(&config, "").unwrap();

        let cli = TestCli::parse_from(["tocnav", "--config", config.to_str().unwrap(), "--strict"]);
        let err = cli.args.execute().unwrap_err();

        assert!(matches!(err, CliError::Outline(_)));
        assert!(err.to_string().contains("/toc/tocentry[3]"));
        assert!(!dir.path().join("nav.adoc").exists());
    }

    #[test]
    fn test_convert_skips_grouped_entries_by_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("toc.xml"),
            r#"<toc><tocentry><?dbhtml filename="a.html"?></tocentry><tocdiv><tocentry><?dbhtml filename="b.html"?></tocentry></tocdiv></toc>"#,
        )
        .unwrap();
        let config = dir.path().join("tocnav.toml");
        std::fs::write(&config, "").unwrap();

        let cli = TestCli::parse_from(["tocnav", "--config", config.to_str().unwrap()]);
        cli.args.execute().unwrap();

        let nav = std::fs::read_to_string(dir.path().join("nav.adoc")).unwrap();
        assert_eq!(nav, "* xref:a.adoc[]\n");
    }

    #[test]
    fn test_convert_rejects_trailing_markup() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("toc.xml"), "<toc/></bogus>").unwrap();
        let config = dir.path().join("tocnav.toml");
        std::fs::write(&config, "").unwrap();

        let cli = TestCli::parse_from(["tocnav", "--config", config.to_str().unwrap()]);
        assert!(cli.args.execute().is_err());
        assert!(!dir.path().join("nav.adoc").exists());
    }

    #[test]
    fn test_convert_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("tocnav.toml");
        std::fs::write(&config, "").unwrap();

        let cli = TestCli::parse_from(["tocnav", "--config", config.to_str().unwrap()]);
        let err = cli.args.execute().unwrap_err();

        assert!(err.to_string().contains("toc.xml"));
    }
}
