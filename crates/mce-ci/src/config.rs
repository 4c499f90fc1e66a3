//! Pipeline configuration.

use crate::discovery::ExampleFilter;
use crate::toolchain::{default_matrix, ToolchainProfile};
use std::path::PathBuf;

/// Default transcript file name, created in the calling directory.
pub const DEFAULT_TRANSCRIPT: &str = "continuous_integration_output.txt";

/// Everything the CI pipeline needs to know about the project it drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiConfig {
    /// Root of the cmake project; every command runs here.
    pub project_root: PathBuf,

    /// Transcript written alongside the console.
    pub transcript_path: PathBuf,

    /// Directory holding the built example binaries.
    pub examples_dir: PathBuf,

    /// Directory (relative to the root) holding the unit-test binaries.
    pub test_dir: String,

    /// Make target of the full unit-test binary.
    pub unit_test_target: String,

    /// Make target of the minimal unit-test binary.
    pub minimal_unit_test_target: String,

    /// Make target building every example.
    pub examples_target: String,

    /// Which entries of `examples_dir` are runnable examples.
    pub example_filter: ExampleFilter,

    /// Compiler matrix, in execution order.
    pub toolchains: Vec<ToolchainProfile>,
}

impl CiConfig {
    /// Defaults for the mce project rooted at `project_root`.
    pub fn for_project(project_root: impl Into<PathBuf>, transcript_path: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            examples_dir: project_root.join("ex"),
            project_root,
            transcript_path: transcript_path.into(),
            test_dir: "tst".to_string(),
            unit_test_target: "mce_ut".to_string(),
            minimal_unit_test_target: "mce_ut_minimal".to_string(),
            examples_target: "mce_ex".to_string(),
            example_filter: ExampleFilter::default(),
            toolchains: default_matrix(),
        }
    }

    /// Replace the compiler matrix.
    pub fn with_toolchains(mut self, toolchains: Vec<ToolchainProfile>) -> Self {
        self.toolchains = toolchains;
        self
    }

    /// Path of a unit-test binary as invoked from the project root.
    pub fn test_binary(&self, target: &str) -> String {
        format!("./{}/{}", self.test_dir, target)
    }
}
