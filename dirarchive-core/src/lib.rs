pub mod error;
pub mod record;
pub mod scanner;
pub mod sink;
pub mod size;

pub use error::{ArchiveError, NodeAccessError, Result};
pub use record::{EntryRecord, TIMESTAMP_FORMAT, local_timestamp};
pub use scanner::{
    CancellationToken, Counter, ProgressState, ScanConfig, ScanHandle, ScanMessage,
    ScanOrchestrator, ScanRequest, ScanResult, ScanState, WalkEvent, WalkSummary, Walker,
};
pub use sink::{HEADER, RecordSink};
pub use size::{format_count, format_size, progress_percentage};
