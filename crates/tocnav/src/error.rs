//! CLI error types.

use tocnav_config::ConfigError;
use tocnav_outline::OutlineError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Outline(#[from] OutlineError),
}
