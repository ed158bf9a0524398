/*!
 * Configuration handling for treedump
 */

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use clap_complete::Shell;

use crate::ensure;
use crate::error::Result;
use crate::exclude::ExclusionSet;
use crate::utils::{DEFAULT_EXCLUDED_DIRS, DEFAULT_EXCLUDED_FILE_SUFFIXES};

/// Default name of the generated file
pub const DEFAULT_OUTPUT_FILE: &str = "./project_structure_and_content.txt";

/// Format of the summary printed after a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Console tables (default)
    #[default]
    Table,
    /// A single JSON document on stdout
    Json,
    /// No summary
    None,
}

/// Command-line arguments for treedump
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "treedump",
    version = env!("CARGO_PKG_VERSION"),
    about = "Dump a directory tree and the text of its files into a single text file",
    long_about = "Walks a directory tree depth-first and writes an indented listing of every retained directory and file, followed by each file's text content, into one output file."
)]
pub struct Args {
    /// Source directory to dump
    #[clap(default_value = ".")]
    pub source_dir: String,

    /// Output file (overwritten on every run)
    #[clap(default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Comma-separated directory names to skip, in addition to the defaults
    #[clap(long, value_delimiter = ',')]
    pub exclude_dirs: Vec<String>,

    /// Comma-separated file names or suffixes to skip, in addition to the defaults
    #[clap(long, value_delimiter = ',')]
    pub exclude_files: Vec<String>,

    /// Do not apply the built-in exclusion lists
    #[clap(long)]
    pub no_default_excludes: bool,

    /// Summary printed after the run
    #[clap(long, value_enum, default_value_t = ReportKind::default())]
    pub report: ReportKind,

    /// Increase log verbosity (-v info, -vv debug)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors; hide progress and summary
    #[clap(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Root of the tree to dump
    pub source_dir: PathBuf,

    /// Output file path
    pub output_file: PathBuf,

    /// Directory names matched as whole path segments
    pub excluded_dir_names: Vec<String>,

    /// Strings matched as suffixes of paths and file names
    pub excluded_file_suffixes: Vec<String>,

    /// Summary printed after the run
    pub report: ReportKind,

    /// Whether progress and summary are suppressed
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            excluded_dir_names: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            excluded_file_suffixes: DEFAULT_EXCLUDED_FILE_SUFFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            report: ReportKind::default(),
            quiet: false,
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let mut config = if args.no_default_excludes {
            Self {
                excluded_dir_names: Vec::new(),
                excluded_file_suffixes: Vec::new(),
                ..Self::default()
            }
        } else {
            Self::default()
        };

        config.source_dir = PathBuf::from(args.source_dir);
        config.output_file = PathBuf::from(args.output_file);
        config.excluded_dir_names.extend(args.exclude_dirs);
        config.excluded_file_suffixes.extend(args.exclude_files);
        config.report = args.report;
        config.quiet = args.quiet;
        config
    }

    /// Config for a source and output with explicit exclusion lists
    pub fn new(
        source_dir: impl Into<PathBuf>,
        output_file: impl Into<PathBuf>,
        excluded_dir_names: Vec<String>,
        excluded_file_suffixes: Vec<String>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_file: output_file.into(),
            excluded_dir_names,
            excluded_file_suffixes,
            ..Self::default()
        }
    }

    /// The exclusion set handed to the dumper
    pub fn exclusions(&self) -> ExclusionSet {
        ExclusionSet::new(
            self.excluded_dir_names.iter().cloned(),
            self.excluded_file_suffixes.iter().cloned(),
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.source_dir.is_dir(),
            PathNotFound,
            "source directory {}",
            self.source_dir.display()
        );

        // Check if output file directory exists
        if let Some(parent) = self.output_file.parent() {
            ensure!(
                parent == Path::new("") || parent.is_dir(),
                PathNotFound,
                "output directory {}",
                parent.display()
            );
        }

        ensure!(
            !self.output_file.is_dir(),
            Config,
            "output path {} is a directory",
            self.output_file.display()
        );

        Ok(())
    }
}
