/// User actions that can be performed in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Scroll the log up one line
    ScrollUp,
    /// Scroll the log down one line
    ScrollDown,
    /// Scroll the log up by a page
    PageUp,
    /// Scroll the log down by a page
    PageDown,
    /// Jump back to the newest log line
    FollowLog,
    /// Reveal the finished catalogue in the file manager
    RevealOutput,
    /// Quit the application (cancels a running scan)
    Quit,
    /// No action (for tick events)
    Tick,
}
