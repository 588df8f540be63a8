//! Model artifact discovery.
//!
//! Artifacts are found by file-name convention (a fixed prefix and
//! extension) in an ordered list of directories. The first directory that
//! holds a match wins; within a directory, names are compared in sorted
//! order so the choice does not depend on directory iteration order.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

pub const DEFAULT_ARTIFACT_PREFIX: &str = "modelo_pandeo_acero_";
pub const DEFAULT_ARTIFACT_SUFFIX: &str = ".joblib";

/// Searches directories for a model artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocator {
    pub prefix: String,
    pub suffix: String,
    pub search_dirs: Vec<PathBuf>,
}

impl Default for ArtifactLocator {
    fn default() -> Self {
        ArtifactLocator {
            prefix: DEFAULT_ARTIFACT_PREFIX.to_string(),
            suffix: DEFAULT_ARTIFACT_SUFFIX.to_string(),
            search_dirs: Vec::new(),
        }
    }
}

impl ArtifactLocator {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        ArtifactLocator {
            prefix: prefix.into(),
            suffix: suffix.into(),
            search_dirs: Vec::new(),
        }
    }

    /// Append a directory to the search order
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    pub fn matches(&self, file_name: &str) -> bool {
        file_name.len() >= self.prefix.len() + self.suffix.len()
            && file_name.starts_with(&self.prefix)
            && file_name.ends_with(&self.suffix)
    }

    /// Find the first matching artifact, or `None`.
    ///
    /// Unreadable or missing directories are skipped.
    pub fn locate(&self) -> Option<PathBuf> {
        for dir in &self.search_dirs {
            match self.locate_in(dir) {
                Ok(Some(path)) => {
                    debug!(path = %path.display(), "Found model artifact");
                    return Some(path);
                }
                Ok(None) => debug!(dir = %dir.display(), "No model artifact in directory"),
                Err(e) => debug!(dir = %dir.display(), error = %e, "Skipping unreadable directory"),
            }
        }
        warn!(
            prefix = %self.prefix,
            suffix = %self.suffix,
            dirs = self.search_dirs.len(),
            "No model artifact found"
        );
        None
    }

    fn locate_in(&self, dir: &Path) -> std::io::Result<Option<PathBuf>> {
        let mut names: Vec<String> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| self.matches(name))
            .collect();
        names.sort();
        Ok(names.into_iter().next().map(|name| dir.join(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_name_matching() {
        let locator = ArtifactLocator::default();
        assert!(locator.matches("modelo_pandeo_acero_v2.joblib"));
        assert!(locator.matches("modelo_pandeo_acero_.joblib"));
        assert!(!locator.matches("modelo_pandeo_acero_v2.pkl"));
        assert!(!locator.matches("other_model.joblib"));
    }

    #[test]
    fn test_first_directory_wins() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        File::create(second.path().join("modelo_pandeo_acero_a.joblib")).unwrap();
        File::create(first.path().join("modelo_pandeo_acero_z.joblib")).unwrap();

        let locator = ArtifactLocator::default()
            .with_dir(first.path())
            .with_dir(second.path());
        assert_eq!(locator.locate(), Some(first.path().join("modelo_pandeo_acero_z.joblib")));
    }

    #[test]
    fn test_sorted_within_directory() {
        let dir = tempdir().unwrap();
        for name in ["modelo_pandeo_acero_b.joblib", "modelo_pandeo_acero_a.joblib", "notes.txt"] {
            File::create(dir.path().join(name)).unwrap();
        }
        let locator = ArtifactLocator::default().with_dir(dir.path());
        assert_eq!(locator.locate(), Some(dir.path().join("modelo_pandeo_acero_a.joblib")));
    }

    #[test]
    fn test_missing_directories_skipped() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("modelo_pandeo_acero_x.joblib")).unwrap();
        let locator = ArtifactLocator::default()
            .with_dir(dir.path().join("does-not-exist"))
            .with_dir(dir.path());
        assert!(locator.locate().is_some());
    }

    #[test]
    fn test_nothing_found() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("modelo_pandeo_acero_dir.joblib")).unwrap();
        let locator = ArtifactLocator::default().with_dir(dir.path());
        assert_eq!(locator.locate(), None);
    }
}
