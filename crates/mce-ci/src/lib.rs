//! mce CI - build and test orchestration for the mce library
//!
//! Provides a fail-fast pipeline that:
//! - Runs cmake/make stages and test binaries under a gcc/clang matrix
//! - Streams command output live while logging googletest-style banners
//!   to the console and a transcript file
//! - Collapses the whole run into a single pass/fail outcome

pub mod command;
pub mod config;
pub mod discovery;
pub mod error;
pub mod pipeline;
pub mod runner;
pub mod sink;
pub mod stage;
pub mod telemetry;
pub mod toolchain;
pub mod validate;

// Re-export key types
pub use command::{CommandLine, EmptyCommandLine, ExecContext};
pub use config::{CiConfig, DEFAULT_TRANSCRIPT};
pub use discovery::{discover_examples, ExampleFilter};
pub use error::{CiError, Result};
pub use pipeline::{CiPipeline, PipelineOutcome};
pub use runner::{CommandResult, CommandRunner, ProcessRunner};
pub use sink::{Banner, DualSink};
pub use stage::Stage;
pub use telemetry::init_tracing;
pub use toolchain::{default_matrix, ToolchainProfile};
pub use validate::{validate, validate_all};
