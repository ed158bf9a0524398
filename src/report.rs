/*!
 * Reporting functionality for treedump
 *
 * Renders the statistics of a finished dump either as console tables
 * (via the tabled library) or as a JSON document.
 */

use std::time::Duration;

use serde::{Serialize, Serializer};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::dumper::DumpStatistics;
use crate::error::Result;
use crate::utils::format_file_size;

/// Information about a file in the report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileReportInfo {
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
    /// Whether the file was written with an error marker
    pub failed: bool,
}

/// Summary of a finished dump
#[derive(Debug, Clone, Serialize)]
pub struct DumpReport {
    /// Output file path
    pub output_file: String,
    /// Time taken by the dump
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    /// Counters gathered by the dumper
    #[serde(flatten)]
    pub statistics: DumpStatistics,
}

fn serialize_millis<S: Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}

/// Format of the report output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
    /// Pretty printed JSON
    Json,
}

/// Report generator for dump results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &DumpReport) -> Result<String> {
        match self.format {
            ReportFormat::ConsoleTable => Ok(self.generate_console_report(report)),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &DumpReport) -> Result<()> {
        let text = self.generate_report(report)?;
        match self.format {
            ReportFormat::ConsoleTable => println!("\n{}", text),
            ReportFormat::Json => println!("{}", text),
        }
        Ok(())
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    // Keep the tail of long paths, where the file name lives
    fn format_path(&self, path: &str, max_len: usize) -> String {
        let count = path.chars().count();
        if count <= max_len {
            return path.to_string();
        }
        let tail: String = path.chars().skip(count - (max_len - 3)).collect();
        format!("...{}", tail)
    }

    fn styled(mut table: Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table.to_string()
    }

    fn create_summary_table(&self, report: &DumpReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let stats = &report.statistics;
        let rows = vec![
            SummaryRow {
                key: "📂 Output File".to_string(),
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "🗂️ Directories".to_string(),
                value: format!(
                    "{} written / {} skipped",
                    self.format_number(stats.dirs_written),
                    self.format_number(stats.dirs_skipped)
                ),
            },
            SummaryRow {
                key: "📄 Files Written".to_string(),
                value: self.format_number(stats.files_written),
            },
            SummaryRow {
                key: "⚠️ Unreadable Files".to_string(),
                value: self.format_number(stats.files_failed),
            },
            SummaryRow {
                key: "🚫 Excluded Files".to_string(),
                value: self.format_number(stats.files_excluded),
            },
            SummaryRow {
                key: "📝 Total Lines".to_string(),
                value: self.format_number(stats.total_lines),
            },
            SummaryRow {
                key: "📦 Output Size".to_string(),
                value: format_file_size(stats.bytes_written),
            },
        ];

        Self::styled(Table::new(rows))
    }

    fn create_files_table(&self, report: &DumpReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Chars")]
            chars: String,

            #[tabled(rename = "Status")]
            status: String,
        }

        // Largest first
        let mut files: Vec<_> = report.statistics.file_details.iter().collect();
        files.sort_by(|(_, a), (_, b)| b.chars.cmp(&a.chars));
        files.truncate(if files.len() > 15 { 10 } else { files.len() });

        let rows: Vec<FileRow> = files
            .iter()
            .map(|(path, info)| FileRow {
                path: self.format_path(path, 60),
                lines: self.format_number(info.lines),
                chars: self.format_number(info.chars),
                status: if info.failed { "error" } else { "ok" }.to_string(),
            })
            .collect();

        Self::styled(Table::new(rows))
    }

    fn generate_console_report(&self, report: &DumpReport) -> String {
        let summary_table = self.create_summary_table(report);
        let files_table = self.create_files_table(report);

        let summary_title = "✅  DUMP COMPLETE";
        let files_title = if report.statistics.file_details.len() > 15 {
            "📋  TOP 10 LARGEST FILES BY CHARACTER COUNT  📋"
        } else {
            "📋  PROCESSED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title, files_table, summary_title, summary_table
        )
    }
}
