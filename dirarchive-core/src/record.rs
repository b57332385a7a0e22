use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local, SubsecRound};

/// Fixed timestamp layout for the "Last Update Date" column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything the catalogue records about one filesystem entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    /// Absolute path of the entry
    pub path: PathBuf,
    /// Final path component
    pub name: String,
    /// Extension including its leading dot, empty when there is none
    pub extension: String,
    /// Size in bytes (0 for directories and unreadable files)
    pub size: u64,
    /// Last write time, local wall clock, whole seconds
    pub modified: DateTime<Local>,
    pub is_directory: bool,
}

impl EntryRecord {
    pub fn new(path: PathBuf, size: u64, modified: DateTime<Local>, is_directory: bool) -> Self {
        let (name, extension) = split_name(&path);
        Self {
            name,
            extension,
            size: if is_directory { 0 } else { size },
            modified: modified.trunc_subsecs(0),
            is_directory,
            path,
        }
    }

    pub fn modified_text(&self) -> String {
        self.modified.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn directory_flag(&self) -> &'static str {
        if self.is_directory { "Yes" } else { "No" }
    }
}

/// Convert a filesystem time to local wall-clock time at second resolution.
///
/// Returns `None` for times chrono cannot represent; some filesystems store
/// modification times millions of years away.
pub fn local_timestamp(time: SystemTime) -> Option<DateTime<Local>> {
    let secs = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).ok()?,
        Err(before) => {
            // Round toward the earlier second
            let before = before.duration();
            let whole = i64::try_from(before.as_secs()).ok()?;
            if before.subsec_nanos() > 0 {
                whole.checked_neg()?.checked_sub(1)?
            } else {
                whole.checked_neg()?
            }
        }
    };
    DateTime::from_timestamp(secs, 0).map(|utc| utc.with_timezone(&Local))
}

/// Derive (name, extension) from a path. Dotfiles such as `.bashrc` have no extension.
fn split_name(path: &Path) -> (String, String) {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    (name, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;

    #[test]
    fn test_name_and_extension() {
        let rec = EntryRecord::new(
            PathBuf::from("/data/report.final.pdf"),
            10,
            Local::now(),
            false,
        );
        assert_eq!(rec.name, "report.final.pdf");
        assert_eq!(rec.extension, ".pdf");
        assert_eq!(rec.directory_flag(), "No");
    }

    #[test]
    fn test_dotfile_and_directory() {
        let dotfile = EntryRecord::new(PathBuf::from("/home/u/.bashrc"), 3, Local::now(), false);
        assert_eq!(dotfile.name, ".bashrc");
        assert_eq!(dotfile.extension, "");

        let dir = EntryRecord::new(PathBuf::from("/home/u/src"), 4096, Local::now(), true);
        assert_eq!(dir.extension, "");
        assert_eq!(dir.size, 0);
        assert_eq!(dir.directory_flag(), "Yes");
    }

    #[test]
    fn test_timestamp_is_local_and_truncated() {
        let expected = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let time = SystemTime::from(expected) + Duration::from_millis(900);

        let modified = local_timestamp(time).unwrap();
        assert_eq!(modified, expected);

        let rec = EntryRecord::new(PathBuf::from("/x/y.txt"), 1, modified, false);
        assert_eq!(rec.modified_text(), "2024-03-09 14:05:07");
    }

    #[test]
    fn test_timestamp_before_epoch_rounds_down() {
        let time = UNIX_EPOCH - Duration::from_millis(1500);
        let utc = local_timestamp(time).unwrap().to_utc();
        assert_eq!(utc.timestamp(), -2);
    }

    #[test]
    fn test_timestamp_out_of_range_is_none() {
        // About 2.85 million years after the epoch, beyond chrono's range
        let Some(far_future) = UNIX_EPOCH.checked_add(Duration::from_secs(90_000_000_000_000)) else {
            return;
        };
        assert_eq!(local_timestamp(far_future), None);
    }
}
