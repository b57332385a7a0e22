use dirarchive_core::ScanState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::theme::Theme;

/// Footer widget showing keyboard hints and the last status message
pub struct Footer<'a> {
    mode: ScanState,
    theme: &'a Theme,
    status: Option<&'a str>,
}

impl<'a> Footer<'a> {
    pub fn new(mode: ScanState, theme: &'a Theme) -> Self {
        Self {
            mode,
            theme,
            status: None,
        }
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status = status;
        self
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        let hints: Vec<(&str, &str)> = match self.mode {
            ScanState::Completed => vec![("o", "Reveal output"), ("↑↓", "Scroll log"), ("q", "Quit")],
            ScanState::Failed => vec![("↑↓", "Scroll log"), ("q", "Quit")],
            _ => vec![("↑↓", "Scroll log"), ("End", "Follow"), ("q", "Cancel & quit")],
        };

        let key_style = Style::default()
            .fg(self.theme.fg)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(self.theme.fg_dim);
        let sep_style = Style::default().fg(self.theme.border);

        let mut x = area.x + 1;
        for (i, (key, desc)) in hints.iter().enumerate() {
            buf.set_string(x, area.y, *key, key_style);
            x += key.chars().count() as u16 + 1;

            buf.set_string(x, area.y, *desc, desc_style);
            x += desc.chars().count() as u16;

            if i < hints.len() - 1 {
                buf.set_string(x, area.y, "  │  ", sep_style);
                x += 5;
            }

            if x >= area.x + area.width - 5 {
                break;
            }
        }

        if let Some(status) = self.status {
            let len = status.chars().count() as u16;
            let status_x = (area.x + area.width).saturating_sub(len + 1);
            if status_x > x + 2 {
                buf.set_string(status_x, area.y, status, Style::default().fg(self.theme.green));
            }
        }
    }
}
