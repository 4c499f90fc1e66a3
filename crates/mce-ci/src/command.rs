//! Command lines and the context they execute in.

use crate::toolchain::ToolchainProfile;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A program plus its arguments. Never empty.
///
/// Serializes as a plain token array; an empty array is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// Create a command line from a program and its arguments.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = vec![program.into()];
        tokens.extend(args.into_iter().map(Into::into));
        Self { tokens }
    }

    /// A command line with no arguments.
    pub fn program(program: impl Into<String>) -> Self {
        Self {
            tokens: vec![program.into()],
        }
    }

    /// Split a command string on whitespace.
    ///
    /// Returns `None` for a blank string.
    pub fn parse(line: &str) -> Option<Self> {
        let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            None
        } else {
            Some(Self { tokens })
        }
    }

    /// The executable to spawn.
    pub fn executable(&self) -> &str {
        &self.tokens[0]
    }

    /// Arguments after the executable.
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

/// Returned when building a [`CommandLine`] from no tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyCommandLine;

impl fmt::Display for EmptyCommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("command line has no executable")
    }
}

impl std::error::Error for EmptyCommandLine {}

impl TryFrom<Vec<String>> for CommandLine {
    type Error = EmptyCommandLine;

    fn try_from(tokens: Vec<String>) -> Result<Self, Self::Error> {
        if tokens.is_empty() {
            Err(EmptyCommandLine)
        } else {
            Ok(Self { tokens })
        }
    }
}

impl From<CommandLine> for Vec<String> {
    fn from(command: CommandLine) -> Self {
        command.tokens
    }
}

impl From<&Path> for CommandLine {
    fn from(path: &Path) -> Self {
        Self::program(path.to_string_lossy().into_owned())
    }
}

/// Where and with which extra environment a command runs.
///
/// The orchestrator never changes its own working directory or environment;
/// everything a command needs is carried here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecContext {
    /// Working directory for the child, inherited when `None`.
    pub working_dir: Option<PathBuf>,

    /// Variables added to the inherited environment.
    pub env: Vec<(String, String)>,
}

impl ExecContext {
    /// Run in `dir` with the inherited environment.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
            env: Vec::new(),
        }
    }

    /// Add the compiler bindings of a matrix entry.
    pub fn with_toolchain(mut self, toolchain: &ToolchainProfile) -> Self {
        self.env.extend(toolchain.env());
        self
    }

    /// Look up a variable set on this context.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
