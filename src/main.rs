/*!
 * Command-line interface for treedump
 */

use std::io;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::Level;

use treedump::config::{Args, Config, ReportKind};
use treedump::dumper::dump_to_file;
use treedump::report::{DumpReport, ReportFormat, Reporter};
use treedump::utils::count_files;

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut command = Args::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        return Ok(());
    }

    init_logging(args.verbose, args.quiet);

    // Create and validate configuration
    let config = Config::from_args(args);
    config.validate()?;

    let progress = create_progress(&config);

    let start_time = Instant::now();
    let statistics = match dump_to_file(&config, progress.clone()) {
        Ok(statistics) => statistics,
        Err(e) => {
            progress.abandon();
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };
    let duration = start_time.elapsed();

    progress.finish_and_clear();

    let format = match config.report {
        ReportKind::Table if !config.quiet => ReportFormat::ConsoleTable,
        ReportKind::Json if !config.quiet => ReportFormat::Json,
        _ => return Ok(()),
    };

    let report = DumpReport {
        output_file: config.output_file.display().to_string(),
        duration,
        statistics,
    };
    Reporter::new(format).print_report(&report)?;

    Ok(())
}

/// Install a stderr fmt subscriber: warnings by default, -v info, -vv debug
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, _) => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn create_progress(config: &Config) -> ProgressBar {
    if config.quiet {
        return ProgressBar::hidden();
    }

    let total_files = count_files(
        &config.source_dir,
        &config.exclusions(),
        Some(&config.output_file),
    );
    let progress = ProgressBar::new(total_files);
    match ProgressStyle::default_bar()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%)")
    {
        Ok(style) => progress.set_style(style),
        Err(e) => tracing::warn!("invalid progress template: {}", e),
    }
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("📊 Dumping");
    progress.set_message(format!(
        "📂 Scanning directory: {}",
        config.source_dir.display()
    ));
    progress
}
