use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Padding, Widget},
};

use crate::app::AppState;

use super::header::truncate_left;
use super::theme::Theme;

/// Scrollable pane with the scan's log lines
pub struct LogView<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> LogView<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

/// Rows available for log lines inside the bordered pane
pub fn log_rows(area: Rect) -> usize {
    area.height.saturating_sub(2) as usize
}

impl Widget for LogView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.state.log_scroll > 0 {
            format!(" Log (-{}) ", self.state.log_scroll)
        } else {
            " Log ".to_string()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(title)
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width < 10 {
            return;
        }

        for (row, line) in self.state.visible_logs().enumerate() {
            if row >= inner.height as usize {
                break;
            }
            buf.set_string(
                inner.x,
                inner.y + row as u16,
                truncate_left(line, inner.width as usize),
                Style::default().fg(self.theme.log_color(line)),
            );
        }
    }
}
