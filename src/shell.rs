//! The surroundings a panel handler talks to besides the server: the person at
//! the keyboard and the page (or terminal) hosting the panel.

/// User interaction the handlers need.
///
/// Implemented by the CLI for a terminal and by tests with scripted answers.
pub trait Shell {
    /// Ask a yes/no question; `true` means the user agreed
    fn confirm(&mut self, question: &str) -> bool;

    /// Show a blocking notice
    fn alert(&mut self, message: &str);

    /// The session is dead: drop all panel state and start over
    fn reload(&mut self);
}
