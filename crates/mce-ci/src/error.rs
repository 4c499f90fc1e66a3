//! Error types for mce-ci

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a pipeline instead of failing a single command.
///
/// A command that exits non-zero is not an error at this level; it is
/// reported through [`crate::runner::CommandResult`] and decided on by the
/// caller.
#[derive(Error, Debug)]
pub enum CiError {
    /// Writing to the transcript or the console failed
    #[error("transcript write failed: {0}")]
    Transcript(#[source] std::io::Error),

    /// Forwarding child output to the console failed
    #[error("console write failed: {0}")]
    Console(#[source] std::io::Error),

    /// Waiting on or reading from a spawned command failed
    #[error("command `{command}` could not be awaited: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The examples directory could not be listed
    #[error("cannot list examples in {path}: {source}")]
    ExampleDiscovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The project root does not exist or is not a directory
    #[error("project root {0} is not a directory")]
    ProjectRoot(PathBuf),
}

/// Result alias for mce-ci operations
pub type Result<T> = std::result::Result<T, CiError>;
