//! Fail-fast execution of command sequences.

use crate::command::{CommandLine, ExecContext};
use crate::error::Result;
use crate::runner::CommandRunner;
use crate::sink::DualSink;
use std::io::Write;
use tracing::debug;

/// Run one command between its RUN and result banners.
///
/// Returns whether it exited zero.
pub async fn validate<R, C, T>(
    runner: &R,
    sink: &mut DualSink<C, T>,
    command: &CommandLine,
    ctx: &ExecContext,
) -> Result<bool>
where
    R: CommandRunner + ?Sized,
    C: Write,
    T: Write,
{
    let display = command.to_string();
    sink.print_command_prepend(&display)?;

    let result = runner.execute(command, ctx).await?;
    sink.print_command_result(result.exit_code, &display, &result.captured_error_text)?;

    Ok(result.passed())
}

/// Run `commands` in order, stopping at the first failure.
///
/// Returns `true` only when every command exited zero; an empty sequence
/// passes. Commands after a failing one are never started.
pub async fn validate_all<R, C, T>(
    runner: &R,
    sink: &mut DualSink<C, T>,
    commands: &[CommandLine],
    ctx: &ExecContext,
) -> Result<bool>
where
    R: CommandRunner + ?Sized,
    C: Write,
    T: Write,
{
    for (index, command) in commands.iter().enumerate() {
        if !validate(runner, sink, command, ctx).await? {
            debug!(
                command = %command,
                skipped = commands.len() - index - 1,
                "sequence halted"
            );
            return Ok(false);
        }
    }
    Ok(true)
}
