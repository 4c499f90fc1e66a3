//! CI pipeline orchestration across the compiler matrix.

use crate::command::{CommandLine, ExecContext};
use crate::config::CiConfig;
use crate::discovery::discover_examples;
use crate::error::{CiError, Result};
use crate::runner::CommandRunner;
use crate::sink::DualSink;
use crate::stage::Stage;
use crate::toolchain::ToolchainProfile;
use crate::validate::validate_all;
use std::io::Write;
use std::time::Instant;
use tracing::{error, info, info_span, Instrument};

/// Section title logged once before the first matrix entry.
pub const UNIT_TEST_SECTION: &str = "build and run unit test code";

/// Section title logged before each matrix entry's example stages.
pub const EXAMPLE_SECTION: &str = "build and run example code";

/// Final transcript line of a passing run (no trailing newline).
pub const SUCCESS_LINE: &str = "Integration Validation Success";

/// Final transcript line of a failing run (no trailing newline).
pub const FAILURE_LINE: &str = "Integration Validation FAILURE";

/// How a pipeline run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Every stage passed under every toolchain.
    Passed,

    /// The first failing stage; nothing after it ran.
    Failed { compiler: String, stage: Stage },
}

impl PipelineOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, PipelineOutcome::Passed)
    }

    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

/// CI pipeline orchestrator.
pub struct CiPipeline;

impl CiPipeline {
    /// Run every stage under every toolchain of `config`, strictly in order.
    ///
    /// The first failing stage logs the failure line and ends the run; the
    /// remaining stages and toolchains are never attempted. A runner error
    /// also logs the failure line before it is returned.
    pub async fn run<R, C, T>(
        config: &CiConfig,
        runner: &R,
        sink: &mut DualSink<C, T>,
    ) -> Result<PipelineOutcome>
    where
        R: CommandRunner + ?Sized,
        C: Write,
        T: Write,
    {
        if !config.project_root.is_dir() {
            return Err(CiError::ProjectRoot(config.project_root.clone()));
        }

        let start = Instant::now();
        info!(
            root = %config.project_root.display(),
            toolchains = config.toolchains.len(),
            "Starting CI pipeline"
        );

        sink.print_command_separator(UNIT_TEST_SECTION)?;

        for toolchain in &config.toolchains {
            let span = info_span!("matrix_entry", compiler = %toolchain.compiler_id);
            let ctx = ExecContext::in_dir(&config.project_root).with_toolchain(toolchain);

            for stage in Stage::ALL {
                if stage == Stage::BuildExamples {
                    sink.print_command_separator(EXAMPLE_SECTION)?;
                }

                let passed = match Self::run_stage(config, runner, sink, stage, &ctx)
                    .instrument(span.clone())
                    .await
                {
                    Ok(passed) => passed,
                    Err(e) => {
                        error!(
                            compiler = %toolchain.compiler_id,
                            stage = %stage,
                            error = %e,
                            "CI pipeline aborted"
                        );
                        // Best effort: the sink itself may be what failed.
                        let _ = sink.log(FAILURE_LINE);
                        return Err(e);
                    }
                };

                if !Self::verify_success(sink, passed)? {
                    return Ok(Self::failed(toolchain, stage, start));
                }
            }
        }

        sink.log(SUCCESS_LINE)?;
        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            "CI pipeline completed successfully"
        );
        Ok(PipelineOutcome::Passed)
    }

    async fn run_stage<R, C, T>(
        config: &CiConfig,
        runner: &R,
        sink: &mut DualSink<C, T>,
        stage: Stage,
        ctx: &ExecContext,
    ) -> Result<bool>
    where
        R: CommandRunner + ?Sized,
        C: Write,
        T: Write,
    {
        let start = Instant::now();
        info!(stage = %stage, "Executing stage");

        let commands = match stage {
            Stage::RunExamples => {
                match discover_examples(&config.examples_dir, &config.example_filter).await {
                    Ok(examples) => examples
                        .iter()
                        .map(|path| CommandLine::from(path.as_path()))
                        .collect(),
                    Err(e) => {
                        error!(stage = %stage, error = %e, "example discovery failed");
                        return Ok(false);
                    }
                }
            }
            _ => stage.commands(config),
        };

        let passed = validate_all(runner, sink, &commands, ctx).await?;
        info!(
            stage = %stage,
            commands = commands.len(),
            passed,
            duration_ms = start.elapsed().as_millis() as u64,
            "Stage finished"
        );
        Ok(passed)
    }

    /// Log the failure line when a stage did not pass.
    fn verify_success<C: Write, T: Write>(sink: &mut DualSink<C, T>, passed: bool) -> Result<bool> {
        if !passed {
            sink.log(FAILURE_LINE)?;
        }
        Ok(passed)
    }

    fn failed(toolchain: &ToolchainProfile, stage: Stage, start: Instant) -> PipelineOutcome {
        info!(
            compiler = %toolchain.compiler_id,
            stage = %stage,
            duration_ms = start.elapsed().as_millis() as u64,
            "CI pipeline failed"
        );
        PipelineOutcome::Failed {
            compiler: toolchain.compiler_id.clone(),
            stage,
        }
    }
}
