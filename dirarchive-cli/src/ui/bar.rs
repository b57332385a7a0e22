/// Unicode partial block characters for smooth progress bars
const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Render a progress bar of exactly `width` cells using partial block characters
pub fn render_bar(percentage: u8, width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    let filled_width = (f64::from(percentage.min(100)) / 100.0) * width as f64;
    let full_blocks = filled_width.floor() as usize;
    let partial = ((filled_width - full_blocks as f64) * 8.0).round() as usize;

    let mut bar = String::with_capacity(width * 3);

    for _ in 0..full_blocks.min(width) {
        bar.push(BLOCKS[8]);
    }

    if full_blocks < width && partial > 0 {
        bar.push(BLOCKS[partial.min(8)]);
    }

    let current_len = bar.chars().count();
    for _ in current_len..width {
        bar.push(' ');
    }

    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_bar_empty() {
        let bar = render_bar(0, 10);
        assert_eq!(bar.chars().count(), 10);
        assert!(bar.chars().all(|c| c == ' '));
    }

    #[test]
    fn test_render_bar_full() {
        let bar = render_bar(100, 10);
        assert_eq!(bar.chars().count(), 10);
        assert!(bar.chars().all(|c| c == '█'));
    }

    #[test]
    fn test_render_bar_partial() {
        let bar = render_bar(55, 10);
        assert_eq!(bar.chars().count(), 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(bar.chars().nth(5), Some('▌'));
    }
}
