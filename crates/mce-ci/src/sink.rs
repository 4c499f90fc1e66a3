//! Console + transcript logging in googletest's banner style.
//!
//! Every string goes to both writers, console first, and both are flushed
//! after each write so an aborted run keeps everything logged so far. The
//! banner text is byte-for-byte what existing transcripts contain; tooling
//! diffs new runs against old ones.

use crate::error::{CiError, Result};
use std::fs::File;
use std::io::{Stdout, Write};
use std::path::Path;

/// Fixed-width bracketed tags prefixed to transcript lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Separator,
    Run,
    Ok,
    Stderr,
    Failed,
}

impl Banner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Banner::Separator => "[----------] ",
            Banner::Run => "[ RUN      ] ",
            Banner::Ok => "[       OK ] ",
            Banner::Stderr => "[  STDERR  ] ",
            Banner::Failed => "[  FAILED  ] ",
        }
    }
}

/// Writes each line to a console and a transcript.
pub struct DualSink<C = Stdout, T = File> {
    console: C,
    transcript: T,
    separator_newline_required: bool,
}

impl DualSink<Stdout, File> {
    /// Truncate (or create) the transcript at `path` and pair it with stdout.
    pub fn create(path: &Path) -> Result<Self> {
        let transcript = File::create(path).map_err(CiError::Transcript)?;
        Ok(Self::new(std::io::stdout(), transcript))
    }
}

impl<C: Write, T: Write> DualSink<C, T> {
    pub fn new(console: C, transcript: T) -> Self {
        Self {
            console,
            transcript,
            separator_newline_required: false,
        }
    }

    /// Write `s` unchanged to both sinks.
    pub fn log(&mut self, s: &str) -> Result<()> {
        self.console
            .write_all(s.as_bytes())
            .and_then(|_| self.console.flush())
            .map_err(CiError::Console)?;
        self.transcript
            .write_all(s.as_bytes())
            .and_then(|_| self.transcript.flush())
            .map_err(CiError::Transcript)
    }

    fn log_banner(&mut self, banner: Banner, text: &str) -> Result<()> {
        self.log(&format!("{}{}\n", banner.as_str(), text))
    }

    /// Section header; every header after the first is preceded by a blank line.
    pub fn print_command_separator(&mut self, title: &str) -> Result<()> {
        if self.separator_newline_required {
            self.log("\n")?;
        } else {
            self.separator_newline_required = true;
        }
        self.log_banner(Banner::Separator, title)
    }

    /// Announce a command before it runs.
    pub fn print_command_prepend(&mut self, command: &str) -> Result<()> {
        self.log_banner(Banner::Run, command)
    }

    /// Report how a command finished.
    pub fn print_command_result(&mut self, code: i32, command: &str, err: &str) -> Result<()> {
        if code == 0 {
            return self.log_banner(Banner::Ok, command);
        }
        self.log_banner(Banner::Separator, "")?;
        self.log_banner(Banner::Stderr, "")?;
        self.log(err)?;
        self.log_banner(Banner::Failed, command)?;
        self.log(&format!("    ErrorCode: {}\n", code))
    }

    /// Flush both sinks and hand them back.
    pub fn finish(mut self) -> Result<(C, T)> {
        self.console.flush().map_err(CiError::Console)?;
        self.transcript.flush().map_err(CiError::Transcript)?;
        Ok((self.console, self.transcript))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_sink() -> DualSink<Vec<u8>, Vec<u8>> {
        DualSink::new(Vec::new(), Vec::new())
    }

    fn contents(sink: DualSink<Vec<u8>, Vec<u8>>) -> (String, String) {
        let (console, transcript) = sink.finish().unwrap();
        (
            String::from_utf8(console).unwrap(),
            String::from_utf8(transcript).unwrap(),
        )
    }

    #[test]
    fn test_log_writes_both_sinks_identically() {
        let mut sink = memory_sink();
        sink.log("a\n").unwrap();
        sink.log("b").unwrap();
        let (console, transcript) = contents(sink);
        assert_eq!(console, "a\nb");
        assert_eq!(console, transcript);
    }

    #[test]
    fn test_separator_newline_only_after_first() {
        let mut sink = memory_sink();
        sink.print_command_separator("build and run unit test code").unwrap();
        sink.print_command_separator("build and run example code").unwrap();
        let (_, transcript) = contents(sink);
        assert_eq!(
            transcript,
            "[----------] build and run unit test code\n\n[----------] build and run example code\n"
        );
    }

    #[test]
    fn test_prepend_is_run_banner() {
        let mut sink = memory_sink();
        sink.print_command_prepend("make mce_ut").unwrap();
        let (_, transcript) = contents(sink);
        assert_eq!(transcript, "[ RUN      ] make mce_ut\n");
    }

    #[test]
    fn test_success_result_is_one_ok_line() {
        let mut sink = memory_sink();
        sink.print_command_result(0, "x", "ignored").unwrap();
        let (_, transcript) = contents(sink);
        assert_eq!(transcript, "[       OK ] x\n");
        assert_eq!(transcript.lines().count(), 1);
    }

    #[test]
    fn test_failure_result_banner_sequence() {
        let mut sink = memory_sink();
        sink.print_command_result(2, "x", "boom\n").unwrap();
        let (_, transcript) = contents(sink);
        let lines: Vec<&str> = transcript.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[----------] ",
                "[  STDERR  ] ",
                "boom",
                "[  FAILED  ] x",
                "    ErrorCode: 2",
            ]
        );
    }

    #[test]
    fn test_failure_result_with_empty_error_text() {
        let mut sink = memory_sink();
        sink.print_command_result(-1, "./tst/mce_ut", "").unwrap();
        let (_, transcript) = contents(sink);
        assert_eq!(
            transcript,
            "[----------] \n[  STDERR  ] \n[  FAILED  ] ./tst/mce_ut\n    ErrorCode: -1\n"
        );
    }

    #[test]
    fn test_create_truncates_existing_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("continuous_integration_output.txt");
        std::fs::write(&path, "stale contents from a previous run\n").unwrap();

        let sink = DualSink::create(&path).unwrap();
        sink.finish().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
