use crate::components::{ContactCardView, ProfileCard};
use crate::markup;
use crate::theme::Theme;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use termfolio_core::{InputState, Session, TranscriptEntry, render_safe};
use unicode_width::UnicodeWidthChar;

/// Scrolling transcript with the live prompt underneath
///
/// Lines are anchored to the bottom of the area; `scroll` counts rows back
/// from the newest one.
pub struct TranscriptView<'a> {
    session: &'a Session,
    scroll: usize,
}

impl<'a> TranscriptView<'a> {
    pub fn new(session: &'a Session, scroll: usize) -> Self {
        Self { session, scroll }
    }

    /// Every logical line, before wrapping
    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = self.session.transcript().iter().flat_map(entry_lines).collect();

        if !self.session.is_animating() {
            let mut prompt = markup::to_lines(&render_safe(self.session.prompt()));
            if let Some(last) = prompt.last_mut() {
                last.spans.extend(input_spans(self.session.input()));
            }
            lines.extend(prompt);
        }
        lines
    }

    /// Render and return the largest usable scroll offset
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) -> usize {
        let rows: Vec<Line<'static>> =
            self.lines().into_iter().flat_map(|line| wrap_line(line, area.width as usize)).collect();

        let height = area.height as usize;
        let max_scroll = rows.len().saturating_sub(height);
        let scroll = self.scroll.min(max_scroll);
        let end = rows.len() - scroll;
        let start = end.saturating_sub(height);

        let visible = rows[start..end].to_vec();
        frame.render_widget(Paragraph::new(visible).style(Theme::base()), area);
        max_scroll
    }
}

fn entry_lines(entry: &TranscriptEntry) -> Vec<Line<'static>> {
    match entry {
        TranscriptEntry::Line(text) => markup::to_lines(&render_safe(text)),
        TranscriptEntry::Profile(summary) => ProfileCard::new(summary).lines(),
        TranscriptEntry::Contact(card) => ContactCardView::new(card).lines(),
    }
}

/// Typed text with a block cursor
fn input_spans(input: &InputState) -> Vec<Span<'static>> {
    let typed = Style::default().fg(Theme::GREEN);
    let cursor_style = Style::default().fg(Theme::BG).bg(Theme::FG);

    let chars: Vec<char> = input.text().chars().collect();
    let cursor = input.cursor().min(chars.len());
    let before: String = chars[..cursor].iter().collect();

    let mut spans = Vec::new();
    if !before.is_empty() {
        spans.push(Span::styled(before, typed));
    }
    match chars.get(cursor) {
        Some(under) => {
            spans.push(Span::styled(under.to_string(), cursor_style.add_modifier(Modifier::BOLD)));
            let after: String = chars[cursor + 1..].iter().collect();
            if !after.is_empty() {
                spans.push(Span::styled(after, typed));
            }
        }
        None => spans.push(Span::styled(" ", cursor_style)),
    }
    spans
}

/// Break a line into rows no wider than `width` cells
pub fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return vec![line];
    }

    let mut rows = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for span in line.spans {
        let style = span.style;
        let mut chunk = String::new();
        for c in span.content.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width && used > 0 {
                if !chunk.is_empty() {
                    current.push(Span::styled(std::mem::take(&mut chunk), style));
                }
                rows.push(Line::from(std::mem::take(&mut current)));
                used = 0;
            }
            chunk.push(c);
            used += w;
        }
        if !chunk.is_empty() {
            current.push(Span::styled(chunk, style));
        }
    }
    rows.push(Line::from(current));
    rows
}
