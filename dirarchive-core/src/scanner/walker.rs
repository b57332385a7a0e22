use std::path::Path;

use jwalk::DirEntry;

use super::config::{CancellationToken, ScanConfig, walk_dir};
use crate::error::{ArchiveError, NodeAccessError, Result};
use crate::record::{EntryRecord, local_timestamp};
use crate::sink::RecordSink;

/// Something the walker did with one entry
#[derive(Debug, Clone, Copy)]
pub enum WalkEvent<'a> {
    /// A row was written for this path
    Visited(&'a Path),
    /// This entry (or the listing of its contents) could not be read
    Skipped(&'a NodeAccessError),
}

/// Outcome of the writing pass
#[derive(Debug, Clone, Default)]
pub struct WalkSummary {
    /// Rows written during this walk
    pub visited: u64,
    /// Tolerated errors, in the order they were met
    pub errors: Vec<NodeAccessError>,
}

/// Second pass: builds an `EntryRecord` for every entry below a root and
/// hands it to a `RecordSink`.
///
/// Unreadable entries and directories are recorded and skipped; only sink
/// failures and cancellation end the walk early.
pub struct Walker {
    config: ScanConfig,
    cancel_token: CancellationToken,
}

impl Walker {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    pub fn walk<F>(&self, root: &Path, sink: &mut RecordSink, mut on_event: F) -> Result<WalkSummary>
    where
        F: FnMut(WalkEvent<'_>),
    {
        let mut summary = WalkSummary::default();

        for entry_result in walk_dir(root, &self.config) {
            if self.cancel_token.is_cancelled() {
                return Err(ArchiveError::Cancelled);
            }

            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let skipped = NodeAccessError::from_walk(root, &err);
                    record_skip(&mut summary, skipped, &mut on_event);
                    continue;
                }
            };

            // The directory itself is still written below; only its contents are lost
            if let Some(err) = &entry.read_children_error {
                let skipped = NodeAccessError::from_walk(&entry.path(), err);
                record_skip(&mut summary, skipped, &mut on_event);
            }

            if entry.depth() == 0 {
                continue;
            }

            let path = entry.path();
            let record = match build_record(&entry) {
                Ok(r) => r,
                Err(message) => {
                    record_skip(&mut summary, NodeAccessError::new(path, message), &mut on_event);
                    continue;
                }
            };

            sink.write_entry(&record)?;
            summary.visited += 1;
            tracing::debug!(path = %path.display(), "processed");
            on_event(WalkEvent::Visited(&path));
        }

        Ok(summary)
    }
}

fn record_skip<F>(summary: &mut WalkSummary, skipped: NodeAccessError, on_event: &mut F)
where
    F: FnMut(WalkEvent<'_>),
{
    tracing::warn!(path = %skipped.path.display(), message = %skipped.message, "skipping entry");
    on_event(WalkEvent::Skipped(&skipped));
    summary.errors.push(skipped);
}

fn build_record(entry: &DirEntry<((), ())>) -> std::result::Result<EntryRecord, String> {
    let path = entry.path();
    let file_type = entry.file_type();
    let is_directory = file_type.is_dir();

    let metadata = entry.metadata().map_err(|e| e.to_string())?;
    let modified = metadata.modified().map_err(|e| e.to_string())?;
    let modified = local_timestamp(modified)
        .ok_or_else(|| "modification time out of range".to_string())?;

    let size = if is_directory {
        0
    } else if file_type.is_symlink() {
        // Size of the target; dangling links report 0
        std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0)
    } else {
        metadata.len()
    };

    Ok(EntryRecord::new(path, size, modified, is_directory))
}
