/*!
 * Depth-first directory traversal feeding the text writer
 */

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{DumpError, Result};
use crate::exclude::ExclusionSet;
use crate::report::FileReportInfo;
use crate::types::{DirectoryListing, FileContent};
use crate::utils::{canonical_output_path, is_output_file};
use crate::writer::TextWriter;

/// Counters collected during a dump
#[derive(Debug, Clone, Default, Serialize)]
pub struct DumpStatistics {
    /// Directory headers written
    pub dirs_written: usize,
    /// Directories skipped because they were excluded or could not be listed
    pub dirs_skipped: usize,
    /// Files whose content was written
    pub files_written: usize,
    /// Files written with an error marker
    pub files_failed: usize,
    /// Files dropped by the exclusion rules
    pub files_excluded: usize,
    /// Lines across all written files
    pub total_lines: usize,
    /// Characters across all written files
    pub total_chars: usize,
    /// Bytes of file text read
    pub bytes_read: u64,
    /// Bytes written to the output
    pub bytes_written: u64,
    /// Per-file details keyed by path relative to the source root
    pub file_details: BTreeMap<String, FileReportInfo>,
}

/// Walks a source tree and renders every retained directory and file
pub struct TreeDumper {
    /// Root of the walk, kept exactly as given
    source_dir: PathBuf,
    /// Rules deciding what is skipped
    exclusions: ExclusionSet,
    /// Canonical path of the output file, never dumped into itself
    output_file: Option<PathBuf>,
    /// Progress bar, advanced once per file
    pub progress: ProgressBar,
    statistics: DumpStatistics,
}

impl TreeDumper {
    /// Create a new dumper
    pub fn new(
        source_dir: impl Into<PathBuf>,
        exclusions: ExclusionSet,
        progress: ProgressBar,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            exclusions,
            output_file: None,
            progress,
            statistics: DumpStatistics::default(),
        }
    }

    /// Create a dumper for the source and exclusions of `config`
    pub fn from_config(config: &Config, progress: ProgressBar) -> Self {
        Self::new(config.source_dir.clone(), config.exclusions(), progress)
    }

    /// Never emit the file at `path`
    pub fn skip_output(mut self, path: &Path) -> Self {
        self.output_file = canonical_output_path(path);
        self
    }

    /// Statistics gathered so far
    pub fn statistics(&self) -> &DumpStatistics {
        &self.statistics
    }

    /// Consume the dumper, returning its statistics
    pub fn into_statistics(self) -> DumpStatistics {
        self.statistics
    }

    /// Dump the whole tree into `writer`
    pub fn dump<W: Write>(&mut self, writer: &mut TextWriter<W>) -> Result<()> {
        let root = self.source_dir.clone();
        info!(source = %root.display(), "dumping tree");
        self.visit(&root, 0, writer)?;
        self.statistics.bytes_written = writer.bytes_written();
        Ok(())
    }

    fn visit<W: Write>(
        &mut self,
        dir: &Path,
        depth: usize,
        writer: &mut TextWriter<W>,
    ) -> Result<()> {
        // Subdirectories are filtered while listing, before any descent
        let listing = match self.list_directory(dir, depth) {
            Ok(listing) => listing,
            Err(e) => {
                warn!(
                    dir = %dir.display(),
                    error = %e,
                    "skipping directory that cannot be listed"
                );
                self.statistics.dirs_skipped += 1;
                return Ok(());
            }
        };

        // Only the root can reach this check excluded; children were filtered above
        if self.exclusions.is_path_excluded(dir) {
            debug!(dir = %dir.display(), "directory excluded");
            self.statistics.dirs_skipped += 1;
        } else {
            writer.write_directory(&listing.display_name(), listing.depth)?;
            self.statistics.dirs_written += 1;

            for name in &listing.files {
                if self.exclusions.is_excluded(name) {
                    debug!(file = %name, "file excluded");
                    self.statistics.files_excluded += 1;
                    continue;
                }

                let path = dir.join(name);
                if is_output_file(&path, self.output_file.as_deref()) {
                    debug!(file = %path.display(), "skipping the output file itself");
                    continue;
                }

                self.set_progress_message(name);
                let content = self.read_file_content(&path);
                writer.write_file(name, listing.depth, &content)?;
                self.progress.inc(1);
            }
        }

        for subdir in &listing.subdirs {
            self.visit(&dir.join(subdir), listing.depth + 1, writer)?;
        }

        Ok(())
    }

    /// List one directory, dropping excluded subdirectories.
    ///
    /// Entries come back sorted by file name so that repeated runs over an
    /// unchanged tree produce identical output. Symlinks to directories are
    /// neither listed nor followed.
    fn list_directory(&mut self, dir: &Path, depth: usize) -> walkdir::Result<DirectoryListing> {
        let mut subdirs = Vec::new();
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();

            if entry.file_type().is_dir() {
                if self.exclusions.is_path_excluded(entry.path()) {
                    debug!(dir = %entry.path().display(), "directory excluded");
                    self.statistics.dirs_skipped += 1;
                } else {
                    subdirs.push(name);
                }
            } else if entry.path_is_symlink() && entry.path().is_dir() {
                debug!(link = %entry.path().display(), "not following directory symlink");
            } else {
                files.push(name);
            }
        }

        Ok(DirectoryListing {
            path: dir.to_path_buf(),
            depth,
            subdirs,
            files,
        })
    }

    /// Read a file as UTF-8 text, converting any failure into a marker
    fn read_file_content(&mut self, path: &Path) -> FileContent {
        let rel_path = path
            .strip_prefix(&self.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let content = match fs::metadata(path) {
            Ok(metadata) if !metadata.is_file() => {
                FileContent::Unreadable("not a regular file".to_string())
            }
            Ok(_) => match fs::read_to_string(path) {
                Ok(text) => FileContent::Text(normalize_newlines(text)),
                Err(e) => FileContent::Unreadable(e.to_string()),
            },
            Err(e) => FileContent::Unreadable(e.to_string()),
        };

        match &content {
            FileContent::Text(text) => {
                let lines = text.lines().count();
                let chars = text.chars().count();
                self.statistics.files_written += 1;
                self.statistics.total_lines += lines;
                self.statistics.total_chars += chars;
                self.statistics.bytes_read += text.len() as u64;
                self.statistics
                    .file_details
                    .insert(rel_path, FileReportInfo { lines, chars, failed: false });
            }
            FileContent::Unreadable(message) => {
                warn!(file = %path.display(), error = %message, "failed to read file");
                self.statistics.files_failed += 1;
                self.statistics.file_details.insert(
                    rel_path,
                    FileReportInfo {
                        lines: 0,
                        chars: 0,
                        failed: true,
                    },
                );
            }
        }

        content
    }

    fn set_progress_message(&self, file_name: &str) {
        // Truncate long names to keep the bar on one line
        let count = file_name.chars().count();
        let display_name = if count > 40 {
            let tail: String = file_name.chars().skip(count - 37).collect();
            format!("...{}", tail)
        } else {
            file_name.to_string()
        };
        self.progress
            .set_message(format!("Current file: {}", display_name));
    }
}

/// Convert `\r\n` and lone `\r` line endings to `\n`
pub fn normalize_newlines(text: String) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text
    }
}

/// Dump `config.source_dir` into `config.output_file`.
///
/// The output file is created (or truncated) before the walk starts and is
/// flushed on every exit path.
pub fn dump_to_file(config: &Config, progress: ProgressBar) -> Result<DumpStatistics> {
    let mut writer = TextWriter::create(&config.output_file)?;
    let mut dumper = TreeDumper::from_config(config, progress).skip_output(&config.output_file);

    // Writes into the sink fail as plain IO errors; name the output file
    dumper.dump(&mut writer).map_err(|e| match e {
        DumpError::Io(source) => DumpError::output(&config.output_file, source),
        other => other,
    })?;
    writer
        .finish()
        .map_err(|e| DumpError::output(&config.output_file, e))?;

    Ok(dumper.into_statistics())
}
