use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::app::AppState;

use super::progress::status_indicator;
use super::theme::Theme;

/// Header widget showing title, root path, and status
pub struct Header<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        let title = "DIRARCHIVE";
        let title_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);
        buf.set_string(area.x + 1, area.y, title, title_style);

        buf.set_string(
            area.x + 12,
            area.y,
            "─",
            Style::default().fg(self.theme.border),
        );

        let status = status_indicator(self.state);
        let path = self.state.root_path.to_string_lossy().to_string();
        let max_path_len = (area.width as usize).saturating_sub(status.chars().count() + 18);
        buf.set_string(
            area.x + 14,
            area.y,
            truncate_left(&path, max_path_len),
            Style::default().fg(self.theme.fg),
        );

        let status_style = match self.state.mode {
            dirarchive_core::ScanState::Completed => Style::default().fg(self.theme.green),
            dirarchive_core::ScanState::Failed => Style::default().fg(self.theme.red),
            _ => Style::default().fg(self.theme.yellow),
        };
        let status_x = (area.x + area.width).saturating_sub(status.chars().count() as u16 + 2);
        buf.set_string(status_x, area.y, &status, status_style);
    }
}

/// Keep the tail of `s`, prefixing "..." when it does not fit in `max` chars
pub fn truncate_left(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        return s.to_string();
    }
    if max <= 3 {
        return ".".repeat(max);
    }
    let tail: String = s.chars().skip(len - (max - 3)).collect();
    format!("...{}", tail)
}
