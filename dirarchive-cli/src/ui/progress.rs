use dirarchive_core::{ScanState, format_count};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Padding, Widget},
};

use crate::app::AppState;

use super::bar::render_bar;
use super::header::truncate_left;
use super::theme::Theme;

/// Braille spinner characters
const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Progress box: phase, percentage bar, and output location
pub struct ProgressView<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> ProgressView<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for ProgressView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 || inner.width < 20 {
            return;
        }

        // Phase line
        let (phase, phase_color) = match self.state.mode {
            ScanState::Idle => ("Starting...".to_string(), self.theme.fg),
            ScanState::Counting => ("Counting entries...".to_string(), self.theme.fg),
            ScanState::Writing => ("Writing catalogue...".to_string(), self.theme.fg),
            ScanState::Completed => {
                let written = self.state.result.as_ref().map_or(0, |r| r.records_written);
                let errors = self.state.result.as_ref().map_or(0, |r| r.errors.len());
                (
                    format!(
                        "Done: {} entries written, {} unreadable",
                        format_count(written),
                        format_count(errors as u64)
                    ),
                    self.theme.green,
                )
            }
            ScanState::Failed => (
                format!("Failed: {}", self.state.error.as_deref().unwrap_or("unknown error")),
                self.theme.red,
            ),
        };

        let marker = if self.state.is_scanning() {
            SPINNER[self.state.spinner_frame % SPINNER.len()]
        } else if self.state.mode == ScanState::Completed {
            '✔'
        } else {
            '✘'
        };
        buf.set_string(
            inner.x,
            inner.y,
            marker.to_string(),
            Style::default()
                .fg(self.theme.blue)
                .add_modifier(Modifier::BOLD),
        );
        let max_phase = inner.width.saturating_sub(2) as usize;
        buf.set_string(
            inner.x + 2,
            inner.y,
            truncate_left(&phase, max_phase),
            Style::default().fg(phase_color),
        );

        // Bar line; the percentage is only meaningful once writing starts
        let label = format!(" {:>3}%", self.state.percentage);
        let bar_width = (inner.width as usize).saturating_sub(label.len());
        buf.set_string(
            inner.x,
            inner.y + 1,
            render_bar(self.state.percentage, bar_width),
            Style::default().fg(self.theme.green).bg(self.theme.border),
        );
        buf.set_string(
            inner.x + bar_width as u16,
            inner.y + 1,
            &label,
            Style::default().fg(self.theme.fg_dim),
        );

        // Output line
        let output = format!("Output: {}", self.state.output_path.display());
        buf.set_string(
            inner.x,
            inner.y + 2,
            truncate_left(&output, inner.width as usize),
            Style::default().fg(self.theme.fg_muted),
        );
    }
}

/// Compact status for the header
pub fn status_indicator(state: &AppState) -> String {
    match state.mode {
        ScanState::Completed => "completed".to_string(),
        ScanState::Failed => "failed".to_string(),
        ScanState::Writing => {
            let spinner = SPINNER[state.spinner_frame % SPINNER.len()];
            format!("{} {}%", spinner, state.percentage)
        }
        ScanState::Idle | ScanState::Counting => {
            let spinner = SPINNER[state.spinner_frame % SPINNER.len()];
            format!("{} counting", spinner)
        }
    }
}
