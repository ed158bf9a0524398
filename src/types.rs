/*!
 * Core types for a single dump run
 */

use std::path::{Path, PathBuf};

/// The contents of one directory as seen when it was visited
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    /// Path of the directory, as joined from the source root
    pub path: PathBuf,
    /// Number of components between the source root and this directory
    pub depth: usize,
    /// Names of retained subdirectories, in listing order
    pub subdirs: Vec<String>,
    /// Names of all files, in listing order
    pub files: Vec<String>,
}

impl DirectoryListing {
    /// Name shown in the directory header.
    ///
    /// Paths without a final component (`.`, `..`, `/`) are shown as given.
    pub fn display_name(&self) -> String {
        display_name(&self.path)
    }
}

/// Name used for a directory header line
pub fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => path.to_string_lossy().to_string(),
    }
}

/// Outcome of reading one file as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// The full text of the file
    Text(String),
    /// The file could not be read; carries the failure message
    Unreadable(String),
}
