//! [`SourceTree`] builder for processing scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding source files, with helpers for setup and
/// assertion. Paths are relative to the root.
///
/// # Example
///
/// ```rust
/// use cutter_test_utils::SourceTree;
///
/// let tree = SourceTree::new().with_file("src/A.java", "class A {}\n");
/// tree.assert_file_eq("src/A.java", "class A {}\n");
/// ```
pub struct SourceTree {
    temp_dir: TempDir,
}

impl Default for SourceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceTree {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: impl AsRef<[u8]>) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("SourceTree::write: failed to create {}: {e}", parent.display()));
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("SourceTree::write: failed to write {}: {e}", path.display()));
    }

    pub fn with_file(self, relative: &str, content: impl AsRef<[u8]>) -> Self {
        self.write(relative, content);
        self
    }

    /// # Panics
    /// Panics if the file cannot be read as UTF-8.
    pub fn read(&self, relative: &str) -> String {
        let path = self.path(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    pub fn assert_file_eq(&self, relative: &str, expected: &str) {
        let actual = self.read(relative);
        assert!(
            actual == expected,
            "File {} differs.\nExpected:\n{}\nActual:\n{}",
            relative,
            expected,
            actual
        );
    }

    pub fn assert_file_exists(&self, relative: &str) {
        let path = self.path(relative);
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    pub fn assert_file_not_exists(&self, relative: &str) {
        let path = self.path(relative);
        assert!(!path.exists(), "Expected file NOT to exist: {}", path.display());
    }

    /// Modification time of `relative`, for checking that a file was left alone.
    pub fn modified(&self, relative: &str) -> std::time::SystemTime {
        fs::metadata(self.path(relative))
            .and_then(|m| m.modified())
            .unwrap_or_else(|e| panic!("SourceTree::modified: {relative}: {e}"))
    }
}
