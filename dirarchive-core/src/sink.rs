use std::fs::File;
use std::io;
use std::path::PathBuf;

use crossbeam_channel::Sender;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{ArchiveError, Result};
use crate::record::EntryRecord;
use crate::scanner::{ProgressState, ScanMessage};
use crate::size::format_size;

/// Column names, written once at the top of every catalogue.
///
/// The leading space in " Last Update Date" is part of the established format.
pub const HEADER: [&str; 6] = [
    "Path",
    "Name",
    "Extension",
    "Size",
    " Last Update Date",
    "Is Directory",
];

/// Row writer for the catalogue file.
///
/// Every row is flushed as soon as it is written, so an interrupted scan leaves
/// a file with a valid header and only complete lines.
pub struct RecordSink {
    path: PathBuf,
    writer: Option<csv::Writer<File>>,
    progress: ProgressState,
    last_percentage: Option<u8>,
    progress_tx: Option<Sender<ScanMessage>>,
}

impl RecordSink {
    /// Create (or truncate) the catalogue at `path` and write the header.
    ///
    /// With `quote_fields` off, fields are written verbatim; commas or quotes
    /// inside a path then shift the columns of that row.
    pub fn create(path: impl Into<PathBuf>, quote_fields: bool) -> Result<Self> {
        let path = path.into();
        let file = File::create(&path).map_err(|e| ArchiveError::io(&path, e))?;

        let quote_style = if quote_fields {
            QuoteStyle::Necessary
        } else {
            QuoteStyle::Never
        };
        let writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(quote_style)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(file);

        let mut sink = Self {
            path,
            writer: Some(writer),
            progress: ProgressState::default(),
            last_percentage: None,
            progress_tx: None,
        };
        sink.write_row(HEADER)?;
        Ok(sink)
    }

    /// Report progress on `tx`.
    ///
    /// A `ScanMessage::Progress` goes out only when the whole-number percentage
    /// changes, so a large tree sends at most 101 of them rather than one per row.
    pub fn with_progress(mut self, tx: Sender<ScanMessage>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Set the progress denominator. Must happen before the first row.
    pub fn set_total_entries(&mut self, total: u64) {
        if self.progress.processed() > 0 {
            tracing::warn!(
                processed = self.progress.processed(),
                "progress total set after rows were written"
            );
        }
        self.progress.set_total(total);
    }

    pub fn processed(&self) -> u64 {
        self.progress.processed()
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    /// Serialize one record as a row, persist it, and advance progress
    pub fn write_entry(&mut self, record: &EntryRecord) -> Result<()> {
        let path = record.path.to_string_lossy();
        let size = format_size(record.size);
        let modified = record.modified_text();
        self.write_row([
            path.as_ref(),
            record.name.as_str(),
            record.extension.as_str(),
            size.as_str(),
            modified.as_str(),
            record.directory_flag(),
        ])?;

        self.progress.record_processed();
        self.notify_progress();
        Ok(())
    }

    /// Flush and release the output file. Later writes fail with `ClosedSink`.
    pub fn close(&mut self) -> Result<()> {
        match self.writer.take() {
            Some(mut writer) => writer.flush().map_err(|e| ArchiveError::io(&self.path, e)),
            None => Ok(()),
        }
    }

    fn write_row(&mut self, fields: [&str; 6]) -> Result<()> {
        let writer = self.writer.as_mut().ok_or(ArchiveError::ClosedSink)?;
        writer
            .write_record(fields)
            .map_err(|e| ArchiveError::io(&self.path, io::Error::from(e)))?;
        writer.flush().map_err(|e| ArchiveError::io(&self.path, e))
    }

    fn notify_progress(&mut self) {
        let Some(pct) = self.progress.percentage() else {
            return;
        };
        if self.last_percentage == Some(pct) {
            return;
        }
        self.last_percentage = Some(pct);
        if let Some(tx) = &self.progress_tx {
            let _ = tx.send(ScanMessage::Progress(pct));
        }
    }
}

impl Drop for RecordSink {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "failed to flush catalogue on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use chrono::Local;
    use tempfile::TempDir;

    fn file_record(path: &str, size: u64) -> EntryRecord {
        EntryRecord::new(PathBuf::from(path), size, Local::now(), false)
    }

    #[test]
    fn test_header_written_on_create() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("file_info.csv");

        let sink = RecordSink::create(&out, false).unwrap();
        drop(sink);

        let content = fs::read_to_string(&out).unwrap();
        assert_eq!(
            content,
            "Path,Name,Extension,Size, Last Update Date,Is Directory\n"
        );
    }

    #[test]
    fn test_rows_are_persisted_before_close() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("file_info.csv");

        let mut sink = RecordSink::create(&out, false).unwrap();
        let record = file_record("/data/a.txt", 10);
        sink.write_entry(&record).unwrap();

        // Read while the sink is still open
        let content = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            format!("/data/a.txt,a.txt,.txt,10B,{},No", record.modified_text())
        );
        assert_eq!(sink.processed(), 1);
    }

    #[test]
    fn test_missing_parent_directory_is_io_error() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("missing").join("file_info.csv");

        let err = RecordSink::create(&out, false).err().unwrap();
        assert!(matches!(err, ArchiveError::Io { .. }));
    }

    #[test]
    fn test_write_after_close_fails() {
        let temp = TempDir::new().unwrap();
        let mut sink = RecordSink::create(temp.path().join("out.csv"), false).unwrap();
        sink.close().unwrap();
        assert!(sink.is_closed());

        let err = sink.write_entry(&file_record("/a", 1)).unwrap_err();
        assert!(matches!(err, ArchiveError::ClosedSink));
    }

    #[test]
    fn test_progress_notifications_on_change_only() {
        let temp = TempDir::new().unwrap();
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut sink = RecordSink::create(temp.path().join("out.csv"), false)
            .unwrap()
            .with_progress(tx);
        sink.set_total_entries(3);

        for i in 0..3 {
            sink.write_entry(&file_record(&format!("/f{i}"), 1)).unwrap();
        }
        drop(sink);

        let pcts: Vec<u8> = rx
            .iter()
            .filter_map(|m| match m {
                ScanMessage::Progress(p) => Some(p),
                _ => None,
            })
            .collect();
        assert_eq!(pcts, vec![33, 66, 100]);
    }

    #[test]
    fn test_no_progress_without_total() {
        let temp = TempDir::new().unwrap();
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut sink = RecordSink::create(temp.path().join("out.csv"), false)
            .unwrap()
            .with_progress(tx);

        sink.write_entry(&file_record("/f", 1)).unwrap();
        drop(sink);

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_quoting_is_opt_in() {
        let temp = TempDir::new().unwrap();
        let record = file_record("/data/a,b.txt", 1);

        let raw = temp.path().join("raw.csv");
        let mut sink = RecordSink::create(&raw, false).unwrap();
        sink.write_entry(&record).unwrap();
        sink.close().unwrap();
        let raw_content = fs::read_to_string(&raw).unwrap();
        assert!(raw_content.contains("\n/data/a,b.txt,a,b.txt,.txt,1B,"));

        let quoted = temp.path().join("quoted.csv");
        let mut sink = RecordSink::create(&quoted, true).unwrap();
        sink.write_entry(&record).unwrap();
        sink.close().unwrap();
        let quoted_content = fs::read_to_string(&quoted).unwrap();
        assert!(quoted_content.contains("\n\"/data/a,b.txt\",\"a,b.txt\",.txt,1B,"));
        assert!(quoted_content.starts_with("Path,Name,Extension,Size, Last Update Date,Is Directory\n"));
    }
}
