use termfolio_core::Key;

/// Actions that can be triggered by key events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward a key to the session
    Session(Key),
    /// Scroll the transcript up one page
    PageUp,
    /// Scroll the transcript down one page
    PageDown,
    /// Hide the globe view
    LeaveGlobe,
    /// Quit the application
    Exit,
}

impl KeyAction {
    /// Whether this action edits or submits the input line
    ///
    /// The transcript snaps back to the bottom on these.
    pub fn touches_input(&self) -> bool {
        matches!(self, Self::Session(_))
    }
}
