//! CI stage definitions.

use crate::command::CommandLine;
use crate::config::CiConfig;
use std::fmt;

/// Stages run for every matrix entry, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// cmake, make mce_ut, ./tst/mce_ut
    UnitTests,

    /// cmake, make mce_ut_minimal, ./tst/mce_ut_minimal
    MinimalUnitTests,

    /// make clean, make mce_ex
    BuildExamples,

    /// every discovered example binary
    RunExamples,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::UnitTests,
        Stage::MinimalUnitTests,
        Stage::BuildExamples,
        Stage::RunExamples,
    ];

    /// Get the stage name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::UnitTests => "unit_tests",
            Stage::MinimalUnitTests => "minimal_unit_tests",
            Stage::BuildExamples => "build_examples",
            Stage::RunExamples => "run_examples",
        }
    }

    /// Fixed commands of this stage.
    ///
    /// `RunExamples` has none; its commands come from example discovery.
    pub fn commands(&self, config: &CiConfig) -> Vec<CommandLine> {
        let configure = || {
            CommandLine::new(
                "cmake",
                [config.project_root.to_string_lossy().into_owned()],
            )
        };
        match self {
            Stage::UnitTests => vec![
                configure(),
                CommandLine::new("make", [config.unit_test_target.as_str()]),
                CommandLine::program(config.test_binary(&config.unit_test_target)),
            ],
            Stage::MinimalUnitTests => vec![
                configure(),
                CommandLine::new("make", [config.minimal_unit_test_target.as_str()]),
                CommandLine::program(config.test_binary(&config.minimal_unit_test_target)),
            ],
            Stage::BuildExamples => vec![
                CommandLine::new("make", ["clean"]),
                CommandLine::new("make", [config.examples_target.as_str()]),
            ],
            Stage::RunExamples => Vec::new(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
