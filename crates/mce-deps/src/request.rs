//! Boost version requests and the paths derived from them.

use std::path::{Path, PathBuf};

/// Directory (under the root) that tarballs are extracted into.
pub const BOOST_PARENT_DIR: &str = "boost";

/// Which Boost to build and where to record that it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoostRequest {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,

    /// Download URL of the source tarball.
    pub url: String,

    /// Marker file, relative to the root unless absolute.
    pub built_file: PathBuf,
}

impl BoostRequest {
    /// `boost_<major>_<minor>_<patch>`
    pub fn underscore_version(&self) -> String {
        format!("boost_{}_{}_{}", self.major, self.minor, self.patch)
    }

    /// `boost_<major>_<minor>_<patch>.tar.gz`
    pub fn tarball_name(&self) -> String {
        format!("{}.tar.gz", self.underscore_version())
    }

    /// `boost/boost_<major>_<minor>_<patch>`
    pub fn archive_root(&self) -> PathBuf {
        Path::new(BOOST_PARENT_DIR).join(self.underscore_version())
    }

    /// Resolve every path of this request against `root`.
    pub fn layout(&self, root: &Path) -> BoostLayout {
        let extract_dir = root.join(self.archive_root());
        BoostLayout {
            root: root.to_path_buf(),
            marker: root.join(&self.built_file),
            tarball: root.join(self.tarball_name()),
            parent_dir: root.join(BOOST_PARENT_DIR),
            bootstrap: extract_dir.join("bootstrap.sh"),
            b2: extract_dir.join("b2"),
            extract_dir,
        }
    }
}

/// Absolute locations touched by the dependency build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoostLayout {
    pub root: PathBuf,
    pub marker: PathBuf,
    pub tarball: PathBuf,
    pub parent_dir: PathBuf,
    pub extract_dir: PathBuf,
    pub bootstrap: PathBuf,
    pub b2: PathBuf,
}
