/*!
 * Utility functions and default exclusion lists for treedump
 */

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use walkdir::WalkDir;

use crate::exclude::ExclusionSet;

/// Count the files a dump of `dir` would emit, for progress tracking.
///
/// Mirrors the dumper: an excluded root loses only its own files, and the
/// output file is never counted.
pub fn count_files(dir: &Path, exclusions: &ExclusionSet, output_file: Option<&Path>) -> u64 {
    let root_excluded = exclusions.is_path_excluded(dir);
    let output = output_file.and_then(canonical_output_path);

    WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !e.file_type().is_dir() || !exclusions.is_path_excluded(e.path()))
        .filter_map(Result::ok)
        .filter(|e| !e.file_type().is_dir() && !(e.path_is_symlink() && e.path().is_dir()))
        .filter(|e| !(root_excluded && e.depth() == 1))
        .filter(|e| !exclusions.is_excluded(&e.file_name().to_string_lossy()))
        .filter(|e| !is_output_file(e.path(), output.as_deref()))
        .count() as u64
}

/// Canonical path of an output file, which may not exist yet
pub fn canonical_output_path(path: &Path) -> Option<PathBuf> {
    if let Ok(canonical) = fs::canonicalize(path) {
        return Some(canonical);
    }
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::canonicalize(parent).ok().map(|p| p.join(name))
}

/// Whether `path` is the canonical `output` file
pub fn is_output_file(path: &Path, output: Option<&Path>) -> bool {
    match output {
        Some(output) if output.file_name() == path.file_name() => {
            fs::canonicalize(path).map_or(false, |p| p == output)
        }
        _ => false,
    }
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Directory names skipped unless `--no-default-excludes` is given
pub static DEFAULT_EXCLUDED_DIRS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version Control
        ".git",
        ".svn",
        ".hg",
        ".bzr",
        // Dependencies
        "node_modules",
        "bower_components",
        ".yarn",
        ".pnpm-store",
        // Build & Dist
        ".next",
        ".nuxt",
        "dist",
        "build",
        "target",
        "coverage",
        // Python
        "__pycache__",
        ".pytest_cache",
        ".mypy_cache",
        ".venv",
        "venv",
        // IDEs & Editors
        ".idea",
        ".vscode",
        // Caches
        ".cache",
        ".gradle",
        ".terraform",
    ]
});

/// File names and suffixes skipped unless `--no-default-excludes` is given
pub static DEFAULT_EXCLUDED_FILE_SUFFIXES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Lockfiles
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "Cargo.lock",
        "composer.lock",
        "poetry.lock",
        // Environment & local config
        ".env",
        ".env.local",
        ".gitignore",
        ".gitattributes",
        // Package manifests & tool config
        "package.json",
        "tsconfig.json",
        "tsconfig.server.json",
        "jsconfig.json",
        "next.config.mjs",
        "postcss.config.mjs",
        "tailwind.config.js",
        "README.md",
        // OS Files
        ".DS_Store",
        "Thumbs.db",
        "desktop.ini",
        // Generated
        ".min.js",
        ".min.css",
        ".map",
        ".pyc",
        ".pyo",
        ".class",
        ".tsbuildinfo",
        ".log",
        // Default output of a previous run
        "project_structure_and_content.txt",
    ]
});

/// Exclusion set built from the default lists
pub fn default_exclusions() -> ExclusionSet {
    ExclusionSet::new(
        DEFAULT_EXCLUDED_DIRS.iter().copied(),
        DEFAULT_EXCLUDED_FILE_SUFFIXES.iter().copied(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn formats_sizes() {
        assert_eq!(format_file_size(512), "512 bytes");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn defaults_cover_common_noise() {
        let set = default_exclusions();
        assert!(set.is_excluded("./node_modules"));
        assert!(set.is_excluded("./repo/.git"));
        assert!(set.is_excluded("yarn.lock"));
        assert!(set.is_excluded("bundle.min.js"));
        assert!(!set.is_excluded("./src/main.rs"));
    }

    #[test]
    fn defaults_cover_common_config_files() {
        let set = default_exclusions();
        for name in [
            "package.json",
            "tsconfig.json",
            "tsconfig.server.json",
            "jsconfig.json",
            "next.config.mjs",
            "postcss.config.mjs",
            "tailwind.config.js",
            "README.md",
        ] {
            assert!(set.is_excluded(name), "{} should be excluded", name);
        }
        assert!(!set.is_excluded("index.js"));
        assert!(!set.is_excluded("docs.md"));
    }

    #[test]
    fn counts_only_retained_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules").join("pkg")).unwrap();
        fs::write(dir.path().join("src").join("lib.rs"), "").unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();
        fs::write(dir.path().join("yarn.lock"), "").unwrap();
        fs::write(dir.path().join("node_modules").join("pkg").join("index.js"), "").unwrap();

        // README.md and yarn.lock are default exclusions
        assert_eq!(count_files(dir.path(), &default_exclusions(), None), 1);
        assert_eq!(count_files(dir.path(), &ExclusionSet::default(), None), 4);
    }

    #[test]
    fn name_excluded_root_counts_nothing() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("target");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("a.txt"), "").unwrap();
        fs::write(root.join("sub").join("b.txt"), "").unwrap();

        assert_eq!(count_files(&root, &default_exclusions(), None), 0);
    }

    #[test]
    fn suffix_excluded_root_counts_only_children() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("data.lock");
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("top.txt"), "").unwrap();
        fs::write(root.join("a").join("x.txt"), "").unwrap();

        let set = ExclusionSet::new(Vec::<String>::new(), [".lock"]);
        assert_eq!(count_files(&root, &set, None), 1);
    }

    #[test]
    fn output_file_is_not_counted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("main.rs"), "").unwrap();
        let output = dir.path().join("dump.txt");

        // Not created yet: resolved through its parent directory
        assert_eq!(count_files(dir.path(), &ExclusionSet::default(), Some(&output)), 1);
        fs::write(&output, "").unwrap();
        assert_eq!(count_files(dir.path(), &ExclusionSet::default(), Some(&output)), 1);
        assert_eq!(count_files(dir.path(), &ExclusionSet::default(), None), 2);
    }
}
