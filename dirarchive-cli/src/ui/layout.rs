use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main application layout
pub struct AppLayout {
    pub header: Rect,
    pub progress: Rect,
    pub log: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(5), // Progress box
                Constraint::Min(3),    // Log pane
                Constraint::Length(1), // Footer
            ])
            .split(area);

        Self {
            header: chunks[0],
            progress: chunks[1],
            log: chunks[2],
            footer: chunks[3],
        }
    }
}
