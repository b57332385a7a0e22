use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dirarchive_core::ScanState;

use crate::app::Action;

/// Map key events to actions based on the scan phase
pub fn handle_key(key: KeyEvent, mode: ScanState) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,

        // Log navigation
        KeyCode::Up | KeyCode::Char('k') => Action::ScrollUp,
        KeyCode::Down | KeyCode::Char('j') => Action::ScrollDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::End | KeyCode::Char('G') => Action::FollowLog,

        KeyCode::Char('o') if mode == ScanState::Completed => Action::RevealOutput,

        _ => Action::Tick,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_reveal_only_after_completion() {
        assert_eq!(handle_key(key(KeyCode::Char('o')), ScanState::Writing), Action::Tick);
        assert_eq!(handle_key(key(KeyCode::Char('o')), ScanState::Failed), Action::Tick);
        assert_eq!(
            handle_key(key(KeyCode::Char('o')), ScanState::Completed),
            Action::RevealOutput
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(handle_key(key(KeyCode::Char('q')), ScanState::Counting), Action::Quit);
        assert_eq!(
            handle_key(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                ScanState::Writing
            ),
            Action::Quit
        );
    }
}
