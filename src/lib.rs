/*!
 * treedump - Dump a directory tree and its file contents into one text file
 *
 * The tree is walked depth-first. Every retained directory gets an indented
 * header, and every retained file gets an underlined header followed by its
 * text. Directory names and file suffixes listed in an [`ExclusionSet`] are
 * skipped.
 */

pub mod config;
pub mod dumper;
pub mod error;
pub mod exclude;
pub mod report;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::Config;
pub use dumper::{dump_to_file, DumpStatistics, TreeDumper};
pub use error::{DumpError, Result};
pub use exclude::ExclusionSet;
pub use report::{DumpReport, FileReportInfo, ReportFormat, Reporter};
pub use types::{DirectoryListing, FileContent};
pub use utils::{count_files, format_file_size};
pub use writer::TextWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
