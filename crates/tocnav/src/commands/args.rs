//! Arguments shared by `convert` and `check`.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tocnav_config::{CliSettings, Config};
use tocnav_outline::{AnnotationScope, MissingFilenamePolicy};

use crate::error::CliError;

/// Where to look for `dbhtml` filename annotations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ScopeArg {
    /// Only the entry's own processing instructions.
    Children,
    /// The entry and everything below it.
    Subtree,
}

impl From<ScopeArg> for AnnotationScope {
    fn from(value: ScopeArg) -> Self {
        match value {
            ScopeArg::Children => Self::Children,
            ScopeArg::Subtree => Self::Subtree,
        }
    }
}

/// Options common to every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover tocnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Table of contents XML file (overrides config).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to look for filename annotations (overrides config).
    #[arg(long, value_enum)]
    scope: Option<ScopeArg>,

    /// Fail on entries without a filename instead of using the placeholder.
    #[arg(long)]
    strict: bool,

    /// Enable verbose output (log every entry).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Build CLI settings, with an optional output override.
    pub(crate) fn cli_settings(&self, output: Option<PathBuf>) -> CliSettings {
        CliSettings {
            input: self.input.clone(),
            output,
            annotation_scope: self.scope.map(AnnotationScope::from),
            missing_filename: self.strict.then_some(MissingFilenamePolicy::Error),
        }
    }

    /// Load configuration with these arguments applied.
    pub(crate) fn load_config(&self, output: Option<PathBuf>) -> Result<Config, CliError> {
        let settings = self.cli_settings(output);
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        common: CommonArgs,
    }

    #[test]
    fn test_defaults_override_nothing() {
        let cli = TestCli::parse_from(["tocnav"]);
        let settings = cli.common.cli_settings(None);

        assert!(settings.input.is_none());
        assert!(settings.output.is_none());
        assert!(settings.annotation_scope.is_none());
        assert!(settings.missing_filename.is_none());
    }

    #[test]
    fn test_flags_map_to_settings() {
        let cli = TestCli::parse_from([
            "tocnav", "--input", "toc.xml", "--scope", "subtree", "--strict",
        ]);
        let settings = cli.common.cli_settings(Some(PathBuf::from("nav.adoc")));

        assert_eq!(settings.input, Some(PathBuf::from("toc.xml")));
        assert_eq!(settings.output, Some(PathBuf::from("nav.adoc")));
        assert_eq!(settings.annotation_scope, Some(AnnotationScope::Subtree));
        assert_eq!(
            settings.missing_filename,
            Some(MissingFilenamePolicy::Error)
        );
    }

    #[test]
    fn test_invalid_scope_rejected() {
        assert!(TestCli::try_parse_from(["tocnav", "--scope", "everywhere"]).is_err());
    }
}
