mod config;
mod counter;
mod orchestrator;
mod progress;
mod walker;

pub use config::{CancellationToken, ScanConfig};
pub use counter::Counter;
pub use orchestrator::{ScanHandle, ScanOrchestrator, ScanRequest, ScanResult};
pub use progress::{ProgressState, ScanMessage, ScanState};
pub use walker::{WalkEvent, WalkSummary, Walker};
