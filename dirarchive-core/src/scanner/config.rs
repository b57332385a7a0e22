use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use jwalk::WalkDir;

/// Scanner configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Follow symbolic links
    pub follow_symlinks: bool,
    /// Number of parallel threads for directory reads (0 = auto)
    pub num_threads: usize,
    /// Quote fields containing delimiters or quotes instead of writing them raw
    pub quote_fields: bool,
    /// Send a log message for every entry written
    pub log_visits: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            num_threads: 0, // auto
            quote_fields: false,
            log_visits: true,
        }
    }
}

/// Cancellation token for stopping scans
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Traversal shared by both passes: every entry, sorted by name, depth-first.
///
/// Directory reads may run in parallel but results are always delivered in
/// the same order, which keeps the two passes and repeated scans consistent.
pub(crate) fn walk_dir(root: &Path, config: &ScanConfig) -> WalkDir {
    let walker = WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(config.follow_symlinks)
        .sort(true);

    if config.num_threads > 0 {
        walker.parallelism(jwalk::Parallelism::RayonNewPool(config.num_threads))
    } else {
        walker
    }
}

pub(crate) fn is_permission_denied(err: &jwalk::Error) -> bool {
    err.io_error()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::PermissionDenied)
}
