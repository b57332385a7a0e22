use std::path::Path;

use super::config::{CancellationToken, ScanConfig, is_permission_denied, walk_dir};
use crate::error::{ArchiveError, Result};

/// First pass: counts every entry below a root without reading metadata.
///
/// Directories whose contents cannot be listed because of missing permissions
/// are still counted themselves; their descendants are skipped. Any other
/// traversal error aborts the count.
pub struct Counter {
    config: ScanConfig,
    cancel_token: CancellationToken,
}

impl Counter {
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

    /// Number of entries strictly below `root` (the root itself is not counted)
    pub fn count(&self, root: &Path) -> Result<u64> {
        let mut count = 0u64;

        for entry_result in walk_dir(root, &self.config) {
            if self.cancel_token.is_cancelled() {
                return Err(ArchiveError::Cancelled);
            }

            let entry = match entry_result {
                Ok(e) => e,
                Err(err) if is_permission_denied(&err) => {
                    tracing::debug!(error = %err, "skipping unreadable entry while counting");
                    continue;
                }
                Err(err) => return Err(ArchiveError::traversal(root, &err)),
            };

            if let Some(err) = &entry.read_children_error {
                if !is_permission_denied(err) {
                    return Err(ArchiveError::traversal(&entry.path(), err));
                }
                tracing::debug!(path = %entry.path().display(), "skipping unreadable directory while counting");
            }

            if entry.depth() > 0 {
                count += 1;
            }
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_count_empty_dir() {
        let temp = TempDir::new().unwrap();
        let counter = Counter::new(ScanConfig::default());
        assert_eq!(counter.count(temp.path()).unwrap(), 0);
    }

    #[test]
    fn test_count_nested() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "0123456789").unwrap();
        fs::create_dir(temp.path().join("d")).unwrap();
        fs::create_dir_all(temp.path().join("e/f")).unwrap();
        fs::write(temp.path().join("e/f/g.bin"), [0u8; 4]).unwrap();
        fs::write(temp.path().join(".hidden"), "x").unwrap();

        let counter = Counter::new(ScanConfig::default());
        // a.txt, d, e, e/f, e/f/g.bin, .hidden
        assert_eq!(counter.count(temp.path()).unwrap(), 6);
    }

    #[test]
    fn test_count_with_threads_matches_default() {
        let temp = TempDir::new().unwrap();
        for i in 0..5 {
            let dir = temp.path().join(format!("dir{i}"));
            fs::create_dir(&dir).unwrap();
            for j in 0..4 {
                fs::write(dir.join(format!("file{j}")), "x").unwrap();
            }
        }

        let config = ScanConfig {
            num_threads: 2,
            ..ScanConfig::default()
        };
        assert_eq!(Counter::new(config).count(temp.path()).unwrap(), 25);
        assert_eq!(
            Counter::new(ScanConfig::default()).count(temp.path()).unwrap(),
            25
        );
    }

    #[test]
    fn test_count_missing_root_is_traversal_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = Counter::new(ScanConfig::default())
            .count(&missing)
            .unwrap_err();
        assert!(matches!(err, ArchiveError::Traversal { .. }));
    }

    #[test]
    fn test_count_cancelled() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a"), "x").unwrap();

        let token = CancellationToken::new();
        token.cancel();
        let err = Counter::new(ScanConfig::default())
            .with_cancellation(token)
            .count(temp.path())
            .unwrap_err();
        assert!(matches!(err, ArchiveError::Cancelled));
    }

    #[cfg(unix)]
    #[test]
    fn test_count_symlink_loop_is_traversal_error() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        fs::create_dir_all(root.join("sub")).unwrap();
        std::os::unix::fs::symlink(&root, root.join("sub/back")).unwrap();

        let config = ScanConfig {
            follow_symlinks: true,
            ..ScanConfig::default()
        };
        let err = Counter::new(config).count(&root).unwrap_err();
        match err {
            ArchiveError::Traversal { path, .. } => assert_eq!(path, root.join("sub/back")),
            other => panic!("expected traversal error, got {other:?}"),
        }

        // Without following links the loop is just another entry
        assert_eq!(Counter::new(ScanConfig::default()).count(&root).unwrap(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_count_skips_permission_denied_subtree() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let locked = temp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("secret1"), "x").unwrap();
        fs::write(locked.join("secret2"), "x").unwrap();
        fs::write(temp.path().join("open.txt"), "x").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores mode bits; nothing to verify in that case
        let readable = fs::read_dir(&locked).is_ok();
        let count = Counter::new(ScanConfig::default()).count(temp.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        // "locked" itself and "open.txt"; the secrets are not reachable
        assert_eq!(count.unwrap(), 2);
    }
}
