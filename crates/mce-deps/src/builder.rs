//! Download, extract, bootstrap and build Boost, at most once.

use crate::error::{DepsError, Result};
use crate::request::{BoostLayout, BoostRequest};
use crate::step::{is_dir, is_file, BuildStep};
use mce_ci::{CommandLine, CommandRunner, ExecContext};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Libraries `b2` is asked to build.
pub const B2_FEATURES: [&str; 3] = ["--with-context", "--with-coroutine", "--with-thread"];

/// Steps a call to [`ensure_built`] actually performed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub performed: Vec<BuildStep>,
}

impl BuildReport {
    /// The marker was already present and nothing was touched.
    pub fn already_built(&self) -> bool {
        self.performed.is_empty()
    }
}

/// Bring the Boost build for `request` under `root` to completion.
///
/// Resumes from the first gate whose artifact is missing and stops at the
/// first failure. Once the marker exists, later calls only stat it.
pub async fn ensure_built<R>(runner: &R, request: &BoostRequest, root: &Path) -> Result<BuildReport>
where
    R: CommandRunner + ?Sized,
{
    let start = Instant::now();
    let layout = request.layout(root);
    let mut step = BuildStep::detect(&layout).await;
    let mut report = BuildReport::default();

    info!(version = %request.underscore_version(), step = %step, "Checking boost build");

    if step == BuildStep::Done {
        return Ok(report);
    }

    println!("boost root:{}", layout.extract_dir.display());
    if matches!(step, BuildStep::NeedDownload | BuildStep::NeedExtract) {
        println!("boost tarball:{}", layout.tarball.display());
    }

    let mut b2_announced = false;
    while step != BuildStep::Done {
        if matches!(step, BuildStep::NeedBootstrap | BuildStep::NeedBuild) && !b2_announced {
            println!("b2:{}", layout.b2.display());
            b2_announced = true;
        }

        debug!(step = %step, "Running build step");
        let next = match step {
            BuildStep::NeedDownload => download(runner, request, &layout).await?,
            BuildStep::NeedExtract => extract(runner, &layout).await?,
            BuildStep::NeedBootstrap => bootstrap(runner, &layout).await?,
            BuildStep::NeedBuild => build(runner, &layout).await?,
            BuildStep::Done => BuildStep::Done,
        };
        report.performed.push(step);
        step = next;
    }

    info!(
        steps = report.performed.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Boost build complete"
    );
    Ok(report)
}

async fn download<R>(runner: &R, request: &BoostRequest, layout: &BoostLayout) -> Result<BuildStep>
where
    R: CommandRunner + ?Sized,
{
    let wget = CommandLine::new("wget", [request.url.as_str()]);
    let result = runner.execute(&wget, &ExecContext::in_dir(&layout.root)).await?;
    if !result.passed() {
        return Err(DepsError::DownloadFailed);
    }
    if !is_file(&layout.tarball).await {
        return Err(DepsError::TarballMissing);
    }
    Ok(BuildStep::NeedExtract)
}

async fn extract<R>(runner: &R, layout: &BoostLayout) -> Result<BuildStep>
where
    R: CommandRunner + ?Sized,
{
    tokio::fs::create_dir_all(&layout.parent_dir)
        .await
        .map_err(|source| DepsError::CreateDir {
            path: layout.parent_dir.clone(),
            source,
        })?;

    let tar = CommandLine::new(
        "tar",
        [
            "-xzvf".to_string(),
            layout.tarball.to_string_lossy().into_owned(),
            "-C".to_string(),
            layout.parent_dir.to_string_lossy().into_owned(),
        ],
    );
    let result = runner.execute(&tar, &ExecContext::in_dir(&layout.root)).await?;
    if !result.passed() {
        return Err(DepsError::ExtractFailed);
    }
    if !is_dir(&layout.extract_dir).await {
        return Err(DepsError::DirectoryMissing);
    }

    // Some source drops ship a prebuilt b2.
    if is_file(&layout.b2).await {
        Ok(BuildStep::NeedBuild)
    } else {
        Ok(BuildStep::NeedBootstrap)
    }
}

async fn bootstrap<R>(runner: &R, layout: &BoostLayout) -> Result<BuildStep>
where
    R: CommandRunner + ?Sized,
{
    println!("bootstrap:{}", layout.bootstrap.display());
    if !is_file(&layout.bootstrap).await {
        return Err(DepsError::BootstrapScriptMissing);
    }

    let script = CommandLine::from(layout.bootstrap.as_path());
    let result = runner
        .execute(&script, &ExecContext::in_dir(&layout.extract_dir))
        .await?;
    if !result.passed() {
        return Err(DepsError::BootstrapFailed);
    }
    if !is_file(&layout.b2).await {
        return Err(DepsError::B2Missing);
    }
    Ok(BuildStep::NeedBuild)
}

async fn build<R>(runner: &R, layout: &BoostLayout) -> Result<BuildStep>
where
    R: CommandRunner + ?Sized,
{
    let b2 = CommandLine::new(layout.b2.to_string_lossy().into_owned(), B2_FEATURES);
    let result = runner
        .execute(&b2, &ExecContext::in_dir(&layout.extract_dir))
        .await?;
    if !result.passed() {
        return Err(DepsError::BuildFailed);
    }

    tokio::fs::File::create(&layout.marker)
        .await
        .map_err(|source| DepsError::MarkerFailed {
            path: layout.marker.clone(),
            source,
        })?;
    Ok(BuildStep::Done)
}
