use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};

use super::config::{CancellationToken, ScanConfig};
use super::counter::Counter;
use super::progress::{ScanMessage, ScanState};
use super::walker::{WalkEvent, Walker};
use crate::error::{ArchiveError, NodeAccessError, Result};
use crate::sink::RecordSink;

/// What to scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub root: PathBuf,
}

impl ScanRequest {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Outcome of a completed scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Where the catalogue was written
    pub output: PathBuf,
    pub records_written: u64,
    /// Entries that could not be read, in traversal order
    pub errors: Vec<NodeAccessError>,
}

/// Runs count-then-write scans into a fixed output file.
///
/// One scan at a time: the output file is truncated at the start of every run.
pub struct ScanOrchestrator {
    output: PathBuf,
    config: ScanConfig,
    cancel_token: CancellationToken,
}

impl ScanOrchestrator {
    pub fn new(output: impl Into<PathBuf>, config: ScanConfig) -> Self {
        Self {
            output: output.into(),
            config,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Run the scan on a background thread.
    /// Returns a handle carrying the message stream, cancellation and the result.
    ///
    /// The observer always receives a terminal message, even when the worker panics.
    pub fn start(self, request: ScanRequest) -> ScanHandle {
        let (tx, rx) = crossbeam_channel::unbounded();
        let cancel_token = self.cancel_token.clone();

        let handle = std::thread::spawn(move || run_guarded(&tx, || self.run(&request, &tx)));

        ScanHandle {
            rx,
            handle,
            cancel_token,
        }
    }

    /// Run the scan on the current thread, reporting to `tx`
    pub fn run(&self, request: &ScanRequest, tx: &Sender<ScanMessage>) -> Result<ScanResult> {
        let reporter = Reporter { tx };

        let outcome = validate(request).and_then(|root| self.scan(root, &reporter));

        match &outcome {
            Ok(result) => {
                tracing::info!(
                    output = %result.output.display(),
                    records = result.records_written,
                    errors = result.errors.len(),
                    "scan completed"
                );
                reporter.state(ScanState::Completed);
                reporter.log(format!(
                    "File information has been written to {}",
                    result.output.display()
                ));
                reporter.send(ScanMessage::Completed(result.clone()));
            }
            Err(e) => {
                tracing::error!(error = %e, "scan failed");
                reporter.state(ScanState::Failed);
                reporter.log(format!("An error occurred: {}", e));
                reporter.send(ScanMessage::Failed(e.to_string()));
            }
        }

        outcome
    }

    fn scan(&self, root: &Path, reporter: &Reporter<'_>) -> Result<ScanResult> {
        tracing::info!(root = %root.display(), output = %self.output.display(), "scan started");
        reporter.log(format!("Scanning {}", root.display()));

        // Open the output first so an unwritable location fails before any traversal
        let mut sink = RecordSink::create(&self.output, self.config.quote_fields)?
            .with_progress(reporter.tx.clone());

        reporter.state(ScanState::Counting);
        reporter.log("Counting entries...");
        let total = Counter::new(self.config.clone())
            .with_cancellation(self.cancel_token.clone())
            .count(root)?;
        tracing::info!(total, "counting finished");
        reporter.log(format!("Counted {} entries", total));
        sink.set_total_entries(total);

        reporter.state(ScanState::Writing);
        reporter.log("Processing directory...");
        let log_visits = self.config.log_visits;
        let summary = Walker::new(self.config.clone())
            .with_cancellation(self.cancel_token.clone())
            .walk(root, &mut sink, |event| match event {
                WalkEvent::Visited(path) if log_visits => {
                    reporter.log(format!("Processed: {}", path.display()));
                }
                WalkEvent::Visited(_) => {}
                WalkEvent::Skipped(err) => reporter.log(err.to_string()),
            })?;

        sink.close()?;

        if sink.processed() != total {
            tracing::info!(
                counted = total,
                written = sink.processed(),
                "entry count changed between passes"
            );
        }

        Ok(ScanResult {
            output: self.output.clone(),
            records_written: sink.processed(),
            errors: summary.errors,
        })
    }
}

/// Run `scan`, turning a panic into a `Failed` scan instead of a silent disconnect.
fn run_guarded<F>(tx: &Sender<ScanMessage>, scan: F) -> Result<ScanResult>
where
    F: FnOnce() -> Result<ScanResult>,
{
    match panic::catch_unwind(AssertUnwindSafe(scan)) {
        Ok(outcome) => outcome,
        Err(payload) => {
            let err = ArchiveError::WorkerPanicked {
                message: panic_message(payload.as_ref()),
            };
            tracing::error!(error = %err, "scan worker panicked");
            let reporter = Reporter { tx };
            reporter.state(ScanState::Failed);
            reporter.log(format!("An error occurred: {}", err));
            reporter.send(ScanMessage::Failed(err.to_string()));
            Err(err)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn validate(request: &ScanRequest) -> Result<&Path> {
    let root = request.root.as_path();
    if root.as_os_str().is_empty() {
        return Err(ArchiveError::invalid_request("root directory is empty"));
    }
    if !root.exists() {
        return Err(ArchiveError::invalid_request(format!(
            "path does not exist: {}",
            root.display()
        )));
    }
    if !root.is_dir() {
        return Err(ArchiveError::invalid_request(format!(
            "path is not a directory: {}",
            root.display()
        )));
    }
    Ok(root)
}

struct Reporter<'a> {
    tx: &'a Sender<ScanMessage>,
}

impl Reporter<'_> {
    // A dropped receiver only means nobody is watching
    fn send(&self, msg: ScanMessage) {
        let _ = self.tx.send(msg);
    }

    fn state(&self, state: ScanState) {
        tracing::debug!(%state, "scan state");
        self.send(ScanMessage::StateChanged(state));
    }

    fn log(&self, line: impl Into<String>) {
        self.send(ScanMessage::Log(line.into()));
    }
}

/// Handle to a scan running in the background
pub struct ScanHandle {
    rx: Receiver<ScanMessage>,
    handle: JoinHandle<Result<ScanResult>>,
    cancel_token: CancellationToken,
}

impl ScanHandle {
    /// Messages from the scan; the channel disconnects when the scan ends
    pub fn messages(&self) -> &Receiver<ScanMessage> {
        &self.rx
    }

    /// Ask the scan to stop at the next entry. The partial catalogue is kept.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// Wait for the scan thread and take its result
    pub fn join(self) -> Result<ScanResult> {
        match self.handle.join() {
            Ok(result) => result,
            Err(payload) => Err(ArchiveError::WorkerPanicked {
                message: panic_message(payload.as_ref()),
            }),
        }
    }
}
