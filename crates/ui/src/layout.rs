use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Share of the height given to the globe while it is shown
pub const GLOBE_PERCENT: u16 = 60;

/// Below this height the globe is not drawn
pub const MIN_GLOBE_HEIGHT: u16 = 12;

/// Calculated layout for the terminal screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalLayout {
    /// Globe view (only while active and tall enough)
    pub globe: Option<Rect>,
    /// Transcript and live prompt
    pub transcript: Rect,
    /// Footer with key hints (1 line)
    pub footer: Rect,
}

impl TerminalLayout {
    pub fn calculate(area: Rect, globe_active: bool) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        let main = chunks[0];
        let footer = chunks[1];

        if !globe_active || main.height < MIN_GLOBE_HEIGHT {
            return Self { globe: None, transcript: main, footer };
        }

        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(GLOBE_PERCENT), Constraint::Min(0)])
            .split(main);

        Self { globe: Some(split[0]), transcript: split[1], footer }
    }
}

/// Current terminal size in cells, if stdout is a terminal
pub fn screen_size() -> Option<(u16, u16)> {
    crossterm::terminal::size().ok()
}
