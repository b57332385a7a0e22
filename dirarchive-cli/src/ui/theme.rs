use ratatui::style::Color;

/// Catppuccin Mocha-inspired dark theme with 24-bit RGB colors
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,
    pub fg_muted: Color,

    // Accent colors
    pub blue: Color,
    pub green: Color,
    pub yellow: Color,
    pub red: Color,

    // UI elements
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Catppuccin Mocha base
            bg: Color::Rgb(30, 30, 46),          // Base
            fg: Color::Rgb(205, 214, 244),       // Text
            fg_dim: Color::Rgb(166, 173, 200),   // Subtext0
            fg_muted: Color::Rgb(127, 132, 156), // Overlay0

            // Accent colors
            blue: Color::Rgb(137, 180, 250),   // Blue
            green: Color::Rgb(166, 227, 161),  // Green
            yellow: Color::Rgb(249, 226, 175), // Yellow
            red: Color::Rgb(243, 139, 168),    // Red

            // UI
            border: Color::Rgb(88, 91, 112), // Surface2
        }
    }
}

impl Theme {
    /// Color for a log line: errors red, the final summary green
    pub fn log_color(&self, line: &str) -> Color {
        if line.starts_with("Error accessing path:") || line.starts_with("An error occurred:") {
            self.red
        } else if line.starts_with("File information has been written to") {
            self.green
        } else if line.starts_with("Processed:") {
            self.fg_muted
        } else {
            self.fg
        }
    }
}
