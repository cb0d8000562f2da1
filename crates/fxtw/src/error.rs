//! CLI error types.

use fxtw_config::ConfigError;
use fxtw_fs::FsError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Fs(#[from] FsError),

    #[error("{0} file(s) would be rewritten")]
    Unconverted(usize),
}
