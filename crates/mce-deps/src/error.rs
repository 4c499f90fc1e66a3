//! Error types for mce-deps

use mce_ci::CiError;
use std::path::PathBuf;
use thiserror::Error;

/// Every way the dependency build can stop.
///
/// Each variant renders the one-line diagnostic shown to the user.
#[derive(Error, Debug)]
pub enum DepsError {
    #[error("cannot download boost")]
    DownloadFailed,

    #[error("boost tarball missing")]
    TarballMissing,

    #[error("cannot make directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot extract boost")]
    ExtractFailed,

    #[error("boost directory missing")]
    DirectoryMissing,

    #[error("boost bootstrap.sh missing")]
    BootstrapScriptMissing,

    #[error("could not bootstrap boost")]
    BootstrapFailed,

    #[error("b2 missing")]
    B2Missing,

    #[error("could not build boost")]
    BuildFailed,

    #[error("could not create {path}")]
    MarkerFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The command runner itself failed
    #[error(transparent)]
    Ci(#[from] CiError),
}

/// Result type for mce-deps operations
pub type Result<T> = std::result::Result<T, DepsError>;
