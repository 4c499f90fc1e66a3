//! External command execution with live output forwarding.

use crate::command::{CommandLine, ExecContext};
use crate::error::{CiError, Result};
use async_trait::async_trait;
use std::io::Write;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};

/// Exit code reported when a command cannot be spawned at all.
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 127;

/// Outcome of one command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code (0 = success, -1 = terminated by a signal).
    pub exit_code: i32,

    /// Text the command wrote to its error stream.
    pub captured_error_text: String,
}

impl CommandResult {
    pub fn new(exit_code: i32, captured_error_text: impl Into<String>) -> Self {
        Self {
            exit_code,
            captured_error_text: captured_error_text.into(),
        }
    }

    /// Whether the command exited zero.
    pub fn passed(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes external commands.
///
/// A non-zero exit is a normal result; `Err` is reserved for failures of
/// the runner itself.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn execute(&self, command: &CommandLine, ctx: &ExecContext) -> Result<CommandResult>;
}

/// Spawns real processes and forwards their output to stdout line by line.
///
/// Stdout and stderr are read from separate pipes, so lines the child writes
/// to both may reach the console in a different order than they were written.
/// Stderr lines are forwarded as they arrive and also captured, so on failure
/// they appear a second time in the STDERR block of the transcript.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    fn echo(line: &[u8]) -> Result<()> {
        let mut out = std::io::stdout().lock();
        out.write_all(String::from_utf8_lossy(line).as_bytes())
            .and_then(|_| out.write_all(b"\n"))
            .and_then(|_| out.flush())
            .map_err(CiError::Console)
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn execute(&self, command: &CommandLine, ctx: &ExecContext) -> Result<CommandResult> {
        let start = Instant::now();

        let mut cmd = Command::new(command.executable());
        cmd.args(command.args())
            .envs(ctx.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &ctx.working_dir {
            cmd.current_dir(dir);
        }

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(command = %command, error = %e, "failed to spawn command");
                return Ok(CommandResult::new(
                    SPAWN_FAILURE_EXIT_CODE,
                    format!("failed to spawn `{}`: {}\n", command, e),
                ));
            }
        };

        let wait_err = |source: std::io::Error| CiError::Wait {
            command: command.to_string(),
            source,
        };

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| wait_err(std::io::Error::other("stdout pipe not available")))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| wait_err(std::io::Error::other("stderr pipe not available")))?;

        // Both pipes are drained together so neither can fill up and stall
        // the child; `next_segment` is cancel safe.
        let mut out_lines = BufReader::new(stdout).split(b'\n');
        let mut err_lines = BufReader::new(stderr).split(b'\n');
        let mut out_open = true;
        let mut err_open = true;
        let mut captured = String::new();

        while out_open || err_open {
            tokio::select! {
                segment = out_lines.next_segment(), if out_open => {
                    match segment.map_err(wait_err)? {
                        Some(line) => Self::echo(&line)?,
                        None => out_open = false,
                    }
                }
                segment = err_lines.next_segment(), if err_open => {
                    match segment.map_err(wait_err)? {
                        Some(line) => {
                            Self::echo(&line)?;
                            captured.push_str(&String::from_utf8_lossy(&line));
                            captured.push('\n');
                        }
                        None => err_open = false,
                    }
                }
            }
        }

        let status = child.wait().await.map_err(wait_err)?;
        let exit_code = status.code().unwrap_or(-1);

        debug!(
            command = %command,
            exit_code,
            duration_ms = start.elapsed().as_millis() as u64,
            "command finished"
        );

        Ok(CommandResult::new(exit_code, captured))
    }
}
