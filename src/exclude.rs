/*!
 * Exclusion rules deciding which paths are skipped during a dump
 */

use std::collections::HashSet;
use std::path::{is_separator, Path};

/// Directory names and file suffixes that remove a path from the dump
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    /// Names matched against whole path segments
    dir_names: HashSet<String>,
    /// Strings matched as plain suffixes of the full path
    file_suffixes: Vec<String>,
}

impl ExclusionSet {
    /// Build an exclusion set from directory names and file suffixes
    pub fn new<D, F>(dir_names: D, file_suffixes: F) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            dir_names: dir_names
                .into_iter()
                .map(Into::<String>::into)
                .filter(|d| !d.is_empty())
                .collect(),
            file_suffixes: file_suffixes
                .into_iter()
                .map(Into::<String>::into)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Returns true if `path` must be skipped.
    ///
    /// A path is excluded when any of its separator-delimited segments equals
    /// an excluded directory name, or when the whole string ends with an
    /// excluded suffix. The suffix test is a plain string comparison, so
    /// `"package.json"` matches `web/package.json` and `".lock"` matches
    /// `Cargo.lock`.
    pub fn is_excluded(&self, path: &str) -> bool {
        path.split(is_separator)
            .any(|segment| self.dir_names.contains(segment))
            || self
                .file_suffixes
                .iter()
                .any(|suffix| path.ends_with(suffix.as_str()))
    }

    /// Path flavoured wrapper around [`ExclusionSet::is_excluded`]
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        self.is_excluded(&path.to_string_lossy())
    }
}
