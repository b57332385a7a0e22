// Run with: cargo run -p dirarchive-core --example catalogue -- /path/to/scan [output.csv]

use dirarchive_core::{ScanConfig, ScanMessage, ScanOrchestrator, ScanRequest, format_count};
use std::path::PathBuf;
use std::time::Instant;

fn main() {
    let mut args = std::env::args().skip(1);
    let path = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("file_info.csv"));

    println!("Scanning: {:?} -> {:?}", path, output);

    let config = ScanConfig {
        log_visits: false,
        ..ScanConfig::default()
    };
    let handle = ScanOrchestrator::new(output, config).start(ScanRequest::new(path));

    let start = Instant::now();
    for msg in handle.messages() {
        match msg {
            ScanMessage::StateChanged(state) => {
                println!("[{:>6.1}s] {}", start.elapsed().as_secs_f64(), state);
            }
            ScanMessage::Progress(pct) if pct % 10 == 0 => {
                println!("[{:>6.1}s] {:>3}%", start.elapsed().as_secs_f64(), pct);
            }
            ScanMessage::Log(line) => {
                println!("[{:>6.1}s] {}", start.elapsed().as_secs_f64(), line);
            }
            _ => {}
        }
    }

    match handle.join() {
        Ok(result) => println!(
            "\nFinal: {} records, {} unreadable entries",
            format_count(result.records_written),
            format_count(result.errors.len() as u64)
        ),
        Err(e) => println!("\nFailed: {}", e),
    }
}
