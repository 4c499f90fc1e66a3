//! Finding the example binaries to run.

use crate::error::{CiError, Result};
use std::path::{Path, PathBuf};

/// Substring rules selecting runnable examples by file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleFilter {
    /// Name must contain this.
    pub include: String,

    /// Name must not contain this; such examples need a human at the keyboard.
    pub exclude: String,
}

impl Default for ExampleFilter {
    fn default() -> Self {
        Self {
            include: "example_".to_string(),
            exclude: "human_only".to_string(),
        }
    }
}

impl ExampleFilter {
    pub fn matches(&self, name: &str) -> bool {
        name.contains(&self.include) && !name.contains(&self.exclude)
    }

    /// Matching names, sorted lexicographically.
    pub fn select<I, S>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selected: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|name| self.matches(name))
            .collect();
        selected.sort();
        selected
    }
}

/// List `dir` and return the paths of matching examples in sorted order.
pub async fn discover_examples(dir: &Path, filter: &ExampleFilter) -> Result<Vec<PathBuf>> {
    let discovery_err = |source: std::io::Error| CiError::ExampleDiscovery {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(discovery_err)?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(discovery_err)? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    Ok(filter
        .select(names)
        .into_iter()
        .map(|name| dir.join(name))
        .collect())
}
