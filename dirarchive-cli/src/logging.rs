use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

const DEFAULT_LOG_FILTER: &str = "warn";

fn filter_for(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => DEFAULT_LOG_FILTER,
            1 => "dirarchive_core=info,dirarchive_cli=info",
            2 => "dirarchive_core=debug,dirarchive_cli=debug",
            _ => "trace",
        };
        EnvFilter::new(level)
    })
}

/// Writer for the log file. When the file cannot be created, log lines are
/// discarded and the scan itself reports the unwritable location.
fn log_writer(log_path: &Path) -> BoxMakeWriter {
    match File::create(log_path) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(_) => BoxMakeWriter::new(std::io::sink),
    }
}

/// Log to a file, leaving the terminal to the TUI
pub fn init_file_logging(verbose: u8, log_path: &Path) {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbose))
        .with_ansi(false)
        .with_writer(log_writer(log_path))
        .init();
}

/// Log to stderr
pub fn init_stderr_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbose))
        .with_writer(std::io::stderr)
        .init();
}
