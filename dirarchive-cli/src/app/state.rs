use std::collections::VecDeque;
use std::path::PathBuf;

use dirarchive_core::{ScanMessage, ScanResult, ScanState};

use crate::reveal::reveal_in_file_manager;

/// Log lines kept for the log pane
const MAX_LOG_LINES: usize = 2000;

/// Application state
pub struct AppState {
    /// Current scan phase
    pub mode: ScanState,
    /// Directory being catalogued
    pub root_path: PathBuf,
    /// Catalogue file
    pub output_path: PathBuf,
    /// Last percentage reported by the scan
    pub percentage: u8,
    /// Most recent log lines, oldest first
    pub logs: VecDeque<String>,
    /// Lines scrolled up from the newest log line (0 = follow)
    pub log_scroll: usize,
    /// Visible height of the log pane (set during render)
    pub visible_height: usize,
    /// Result once the scan completes
    pub result: Option<ScanResult>,
    /// Failure message once the scan fails
    pub error: Option<String>,
    /// Outcome of the last reveal attempt
    pub status: Option<String>,
    /// Spinner animation frame
    pub spinner_frame: usize,
    /// Should quit
    pub should_quit: bool,
}

impl AppState {
    pub fn new(root_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            mode: ScanState::Idle,
            root_path,
            output_path,
            percentage: 0,
            logs: VecDeque::new(),
            log_scroll: 0,
            visible_height: 20,
            result: None,
            error: None,
            status: None,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    pub fn is_scanning(&self) -> bool {
        !self.mode.is_terminal()
    }

    /// Fold one scan message into the state
    pub fn apply(&mut self, msg: ScanMessage) {
        match msg {
            ScanMessage::StateChanged(state) => self.mode = state,
            ScanMessage::Progress(pct) => self.percentage = pct,
            ScanMessage::Log(line) => self.push_log(line),
            ScanMessage::Completed(result) => {
                self.mode = ScanState::Completed;
                self.result = Some(result);
            }
            ScanMessage::Failed(error) => {
                self.mode = ScanState::Failed;
                self.error = Some(error);
            }
        }
    }

    fn push_log(&mut self, line: String) {
        if self.logs.len() == MAX_LOG_LINES {
            self.logs.pop_front();
        }
        self.logs.push_back(line);
        // Keep a scrolled-back view anchored on the same lines
        if self.log_scroll > 0 {
            self.log_scroll = (self.log_scroll + 1).min(self.max_scroll());
        }
    }

    fn max_scroll(&self) -> usize {
        self.logs.len().saturating_sub(self.visible_height)
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.log_scroll = (self.log_scroll + lines).min(self.max_scroll());
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.log_scroll = self.log_scroll.saturating_sub(lines);
    }

    pub fn follow_log(&mut self) {
        self.log_scroll = 0;
    }

    /// Log lines that fit the pane, honoring the scroll position
    pub fn visible_logs(&self) -> impl Iterator<Item = &String> {
        let end = self.logs.len().saturating_sub(self.log_scroll);
        let start = end.saturating_sub(self.visible_height);
        self.logs.range(start..end)
    }

    pub fn reveal_output(&mut self) {
        if self.mode != ScanState::Completed {
            return;
        }
        self.status = Some(match reveal_in_file_manager(&self.output_path) {
            Ok(()) => format!("Revealed {}", self.output_path.display()),
            Err(e) => format!("Could not open file manager: {}", e),
        });
    }

    pub fn tick_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
