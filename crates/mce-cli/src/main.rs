//! mce - build orchestration CLI for the mce coroutine library
//!
//! ## Commands
//!
//! - `ci`: build and run unit tests and examples under gcc and clang
//! - `setup-boost`: download, bootstrap and build the Boost dependency once

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mce_ci::{CiConfig, CiPipeline, DualSink, ProcessRunner, DEFAULT_TRANSCRIPT};
use mce_deps::{ensure_built, BoostRequest};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "mce")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build, test and dependency orchestration for mce", long_about = None)]
struct Cli {
    /// Enable verbose diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the continuous integration matrix
    Ci {
        /// Root of the cmake project
        #[arg(long, env = "MCE_PROJECT_ROOT", default_value = ".")]
        project_root: PathBuf,

        /// Transcript file, truncated at the start of every run
        #[arg(long, env = "MCE_CI_LOG", default_value = DEFAULT_TRANSCRIPT)]
        log: PathBuf,
    },

    /// Download, bootstrap and build Boost unless already built
    SetupBoost {
        /// Boost major version
        #[arg(long)]
        major: u32,

        /// Boost minor version
        #[arg(long)]
        minor: u32,

        /// Boost patch version
        #[arg(long)]
        patch: u32,

        /// Source tarball URL
        #[arg(long)]
        url: String,

        /// Marker file recording a finished build
        #[arg(long)]
        built_file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    mce_ci::init_tracing(level);

    let calling_dir = std::env::current_dir().context("Failed to resolve current directory")?;

    match cli.command {
        Commands::Ci { project_root, log } => cmd_ci(&calling_dir, &project_root, &log).await,
        Commands::SetupBoost {
            major,
            minor,
            patch,
            url,
            built_file,
        } => {
            let request = BoostRequest {
                major,
                minor,
                patch,
                url,
                built_file,
            };
            Ok(ExitCode::from(cmd_setup_boost(&calling_dir, &request).await))
        }
    }
}

/// Run the CI matrix and map its outcome to the process exit code
async fn cmd_ci(calling_dir: &Path, project_root: &Path, log: &Path) -> Result<ExitCode> {
    let project_root = calling_dir.join(project_root);
    let project_root = project_root
        .canonicalize()
        .with_context(|| format!("Failed to resolve project root {}", project_root.display()))?;
    let transcript = calling_dir.join(log);

    println!("CONTINUOUS_INTEGRATION_LOG[{}]", transcript.display());

    let config = CiConfig::for_project(project_root, transcript);
    let mut sink = DualSink::create(&config.transcript_path).with_context(|| {
        format!(
            "Failed to open transcript {}",
            config.transcript_path.display()
        )
    })?;

    let outcome = CiPipeline::run(&config, &ProcessRunner::new(), &mut sink).await;
    sink.finish().context("Failed to flush transcript")?;

    match outcome {
        Ok(outcome) => {
            info!(?outcome, "CI finished");
            Ok(ExitCode::from(outcome.exit_code()))
        }
        Err(e) => {
            eprintln!("ERROR:{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Build Boost if needed; diagnostics go to stdout
async fn cmd_setup_boost(root: &Path, request: &BoostRequest) -> u8 {
    match ensure_built(&ProcessRunner::new(), request, root).await {
        Ok(report) => {
            info!(steps = ?report.performed, "setup-boost finished");
            println!("boost built");
            0
        }
        Err(e) => {
            println!("ERROR:{}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ci_defaults() {
        let cli = Cli::try_parse_from(["mce", "ci"]).unwrap();
        match cli.command {
            Commands::Ci { project_root, log } => {
                assert_eq!(project_root, PathBuf::from("."));
                assert_eq!(log, PathBuf::from(DEFAULT_TRANSCRIPT));
            }
            _ => panic!("expected ci"),
        }
    }

    #[test]
    fn test_setup_boost_requires_every_flag() {
        let missing_url = Cli::try_parse_from([
            "mce",
            "setup-boost",
            "--major",
            "1",
            "--minor",
            "74",
            "--patch",
            "0",
            "--built-file",
            "boost_built",
        ]);
        assert!(missing_url.is_err());
    }

    #[test]
    fn test_setup_boost_parses() {
        let cli = Cli::try_parse_from([
            "mce",
            "-v",
            "setup-boost",
            "--major",
            "1",
            "--minor",
            "74",
            "--patch",
            "0",
            "--url",
            "http://example/boost_1_74_0.tar.gz",
            "--built-file",
            "boost_built",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::SetupBoost {
                major,
                minor,
                patch,
                url,
                built_file,
            } => {
                assert_eq!((major, minor, patch), (1, 74, 0));
                assert_eq!(url, "http://example/boost_1_74_0.tar.gz");
                assert_eq!(built_file, PathBuf::from("boost_built"));
            }
            _ => panic!("expected setup-boost"),
        }
    }

    #[tokio::test]
    async fn test_setup_boost_skips_when_marker_exists() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("boost_built"), b"").unwrap();
        let request = BoostRequest {
            major: 1,
            minor: 74,
            patch: 0,
            url: "http://example/boost_1_74_0.tar.gz".to_string(),
            built_file: PathBuf::from("boost_built"),
        };

        let code = cmd_setup_boost(root.path(), &request).await;

        assert_eq!(code, 0);
        assert!(!root.path().join("boost").exists());
    }

    #[tokio::test]
    async fn test_setup_boost_reports_failure_as_exit_one() {
        let root = tempfile::tempdir().unwrap();
        // Present tarball skips the download; tar then rejects the contents.
        std::fs::write(root.path().join("boost_1_74_0.tar.gz"), b"not a gzip archive").unwrap();
        let request = BoostRequest {
            major: 1,
            minor: 74,
            patch: 0,
            url: "http://example/boost_1_74_0.tar.gz".to_string(),
            built_file: PathBuf::from("boost_built"),
        };

        let code = cmd_setup_boost(root.path(), &request).await;

        assert_eq!(code, 1);
        assert!(!root.path().join("boost_built").exists());
        assert!(!root.path().join("boost").join("boost_1_74_0").exists());
    }
}
