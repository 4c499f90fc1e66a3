//! Build progress reconstructed from the filesystem.
//!
//! Nothing but the files themselves records how far a previous run got, so
//! an interrupted build resumes at the first gate whose artifact is missing.

use crate::request::BoostLayout;
use std::fmt;
use std::path::Path;

/// Next thing the dependency build has to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStep {
    /// Tarball not on disk yet.
    NeedDownload,

    /// Tarball present, extraction directory missing.
    NeedExtract,

    /// Sources extracted, `b2` not bootstrapped.
    NeedBootstrap,

    /// `b2` present; the library build always runs from here.
    NeedBuild,

    /// Marker present; nothing to do.
    Done,
}

impl BuildStep {
    /// Work out the first unsatisfied gate for `layout`.
    pub async fn detect(layout: &BoostLayout) -> Self {
        if is_file(&layout.marker).await {
            BuildStep::Done
        } else if !is_dir(&layout.extract_dir).await {
            if is_file(&layout.tarball).await {
                BuildStep::NeedExtract
            } else {
                BuildStep::NeedDownload
            }
        } else if !is_file(&layout.b2).await {
            BuildStep::NeedBootstrap
        } else {
            BuildStep::NeedBuild
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuildStep::NeedDownload => "need_download",
            BuildStep::NeedExtract => "need_extract",
            BuildStep::NeedBootstrap => "need_bootstrap",
            BuildStep::NeedBuild => "need_build",
            BuildStep::Done => "done",
        }
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub(crate) async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

pub(crate) async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::BoostRequest;
    use std::fs;
    use std::path::PathBuf;

    fn layout(root: &Path) -> BoostLayout {
        BoostRequest {
            major: 1,
            minor: 74,
            patch: 0,
            url: "http://example/boost_1_74_0.tar.gz".to_string(),
            built_file: PathBuf::from("boost_built"),
        }
        .layout(root)
    }

    #[tokio::test]
    async fn test_empty_root_needs_download() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(BuildStep::detect(&layout(dir.path())).await, BuildStep::NeedDownload);
    }

    #[tokio::test]
    async fn test_tarball_present_needs_extract() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout(dir.path());
        fs::write(&layout.tarball, b"tgz").unwrap();
        assert_eq!(BuildStep::detect(&layout).await, BuildStep::NeedExtract);
    }

    #[tokio::test]
    async fn test_extracted_without_b2_needs_bootstrap() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout(dir.path());
        fs::create_dir_all(&layout.extract_dir).unwrap();
        assert_eq!(BuildStep::detect(&layout).await, BuildStep::NeedBootstrap);
    }

    #[tokio::test]
    async fn test_b2_present_needs_build() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout(dir.path());
        fs::create_dir_all(&layout.extract_dir).unwrap();
        fs::write(&layout.b2, b"").unwrap();
        assert_eq!(BuildStep::detect(&layout).await, BuildStep::NeedBuild);
    }

    #[tokio::test]
    async fn test_marker_wins_over_everything() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout(dir.path());
        fs::write(&layout.marker, b"").unwrap();
        assert_eq!(BuildStep::detect(&layout).await, BuildStep::Done);
    }

    #[tokio::test]
    async fn test_marker_directory_does_not_count() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout(dir.path());
        fs::create_dir(&layout.marker).unwrap();
        assert_eq!(BuildStep::detect(&layout).await, BuildStep::NeedDownload);
    }
}
