use std::fmt;

use super::orchestrator::ScanResult;
use crate::size::progress_percentage;

/// Phase of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    /// First pass: counting entries for the progress denominator
    Counting,
    /// Second pass: walking and writing rows
    Writing,
    Completed,
    Failed,
}

impl ScanState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanState::Completed | ScanState::Failed)
    }
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScanState::Idle => "Idle",
            ScanState::Counting => "Counting",
            ScanState::Writing => "Writing",
            ScanState::Completed => "Completed",
            ScanState::Failed => "Failed",
        };
        f.write_str(label)
    }
}

/// Messages sent from the scan thread to its observer
#[derive(Debug, Clone)]
pub enum ScanMessage {
    /// The scan moved to a new phase
    StateChanged(ScanState),
    /// Percentage of entries written (0-100), sent when the value changes
    Progress(u8),
    /// Human-readable log line
    Log(String),
    /// Scan finished; the catalogue is complete
    Completed(ScanResult),
    /// Scan aborted
    Failed(String),
}

/// Written/total counters behind the progress percentage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressState {
    total_entries: u64,
    processed_entries: u64,
}

impl ProgressState {
    pub fn processed(&self) -> u64 {
        self.processed_entries
    }

    /// floor(processed * 100 / total), capped at 100; `None` while total is 0
    pub fn percentage(&self) -> Option<u8> {
        progress_percentage(self.processed_entries, self.total_entries)
    }

    pub(crate) fn set_total(&mut self, total: u64) {
        self.total_entries = total;
    }

    pub(crate) fn record_processed(&mut self) {
        self.processed_entries += 1;
    }
}
