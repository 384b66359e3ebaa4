use super::App;
use crate::components::{Footer, Globe, TranscriptView};
use crate::layout::TerminalLayout;
use crate::theme::Theme;

use chrono::Local;
use ratatui::{Frame, Terminal, backend::CrosstermBackend, widgets::Block};
use std::io::{Result, Stdout};

pub fn draw(app: &mut App, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.draw(|frame| app.render(frame))?;
    Ok(())
}

impl App {
    /// Draw the whole screen into `frame`
    pub fn render(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Theme::base()), area);

        let layout = TerminalLayout::calculate(area, self.session.globe_active());

        if let Some(globe_area) = layout.globe {
            Globe::new(self.globe_frame).render(frame, globe_area);
        }

        self.page = (layout.transcript.height as usize).saturating_sub(1).max(1);
        let view = TranscriptView::new(&self.session, self.scroll);
        self.max_scroll = view.render(frame, layout.transcript);
        self.scroll = self.scroll.min(self.max_scroll);

        let footer = Footer::new(
            self.session.identity(),
            self.session.globe_active(),
            self.session.is_animating(),
            Local::now(),
        );
        footer.render(frame, layout.footer);
    }
}
