//! Generated file contract and the persistence boundary.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use eyre::Result;
use serde::Serialize;

/// A single artifact produced by a generator.
///
/// Paths are relative to the run's output directory; the runner joins them
/// under the template base directory before persisting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    /// Relative path from the output directory.
    pub path: String,
    /// File content.
    pub content: String,
}

impl GeneratedFile {
    /// Create a new generated file.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// The persistence collaborator.
///
/// Everything before this boundary is pure in-memory transformation; the
/// sink is the only place generated output touches shared state. Retry
/// policy, if any, belongs to the implementation behind this trait.
pub trait FileSink {
    /// Write one file, creating intermediate directories as needed.
    fn write(&mut self, path: &Path, content: &str) -> Result<()>;
}

/// Filesystem-backed sink.
#[derive(Debug, Default)]
pub struct FsSink;

impl FileSink for FsSink {
    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// In-memory sink for tests and previews.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All files written so far, keyed by path.
    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }

    /// Content of a single written file.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// Number of files written.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileSink for MemorySink {
    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        self.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}
