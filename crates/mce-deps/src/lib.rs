//! Boost dependency bootstrapper
//!
//! Building Boost from cmake is painful, so the project fetches and builds
//! it up front. Every stage is gated on a filesystem check and a zero-byte
//! marker records completion, so repeated invocations are cheap.

pub mod builder;
pub mod error;
pub mod request;
pub mod step;

pub use builder::{ensure_built, BuildReport, B2_FEATURES};
pub use error::{DepsError, Result};
pub use request::{BoostLayout, BoostRequest};
pub use step::BuildStep;
