use crate::theme::Theme;

use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

/// One-line footer: key hints on the left, identity and clock on the right
pub struct Footer<'a> {
    identity: &'a str,
    globe_active: bool,
    animating: bool,
    now: DateTime<Local>,
}

impl<'a> Footer<'a> {
    pub fn new(identity: &'a str, globe_active: bool, animating: bool, now: DateTime<Local>) -> Self {
        Self { identity, globe_active, animating, now }
    }

    pub fn hints(&self) -> Vec<(&'static str, &'static str)> {
        let mut hints = Vec::new();
        if self.animating {
            hints.push(("[Ctrl+C]", "interrupt"));
        } else {
            hints.push(("[Enter]", "run"));
            hints.push(("[Tab]", "complete"));
            hints.push(("[↑↓]", "history"));
        }
        hints.push(("[PgUp/PgDn]", "scroll"));
        if self.globe_active {
            hints.push(("[Esc]", "leave globe"));
        }
        hints.push(("[Ctrl+D]", "quit"));
        hints
    }

    /// Render footer to the given frame
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let status = format!("{}  {}", self.identity, self.now.format("%H:%M:%S"));
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(status.chars().count() as u16 + 1)])
            .split(area);

        let spans: Vec<Span<'_>> = self
            .hints()
            .into_iter()
            .flat_map(|(key, action)| {
                [Span::styled(key, Theme::key()), Span::styled(format!(" {}  ", action), Theme::muted())]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans)).style(Theme::muted()), chunks[0]);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(status, Theme::muted()))).alignment(Alignment::Right),
            chunks[1],
        );
    }
}
