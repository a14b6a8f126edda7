/// Visibility state of an instance's terminal window.
///
/// The state only describes the window; the underlying process stays alive
/// across `Closed` so a later toggle resumes the same session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    /// No window is shown for the session.
    #[default]
    Closed,
    /// The window is visible but not focused.
    Open,
    /// The window is visible and holds focus.
    Focused,
}

impl WindowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowState::Closed => "closed",
            WindowState::Open => "open",
            WindowState::Focused => "focused",
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, WindowState::Open | WindowState::Focused)
    }
}
