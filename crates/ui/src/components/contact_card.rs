use crate::markup::ICON_GLYPH;
use crate::theme::Theme;

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use termfolio_core::ContactCard;
use unicode_width::UnicodeWidthStr;

const TITLE: &str = "Contact";

/// Boxed contact details for the `contact` command
pub struct ContactCardView<'a> {
    card: &'a ContactCard,
}

impl<'a> ContactCardView<'a> {
    pub fn new(card: &'a ContactCard) -> Self {
        Self { card }
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let rows = [
            ("@", "Email", self.card.email.clone(), Theme::YELLOW),
            ("", "GitHub", self.card.github_url(), Theme::WHITE),
            (ICON_GLYPH, "LinkedIn", self.card.linkedin_url(), Theme::LIGHT_BLUE),
        ];
        let label_width = rows.iter().map(|(_, label, _, _)| label.width()).max().unwrap_or(0);
        let inner = rows
            .iter()
            .map(|(_, _, value, _)| 2 + label_width + 2 + value.width())
            .max()
            .unwrap_or(0)
            .max(TITLE.width() + 2);

        let border = Style::default().fg(Theme::BORDER);
        let mut lines = Vec::with_capacity(rows.len() + 2);

        let top_rule = inner.saturating_sub(TITLE.width() + 2);
        lines.push(Line::from(vec![
            Span::styled("╭─ ", border),
            Span::styled(TITLE, Style::default().fg(Theme::GREEN).add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {}─╮", "─".repeat(top_rule)), border),
        ]));

        for (icon, label, value, color) in rows {
            let icon = if icon.is_empty() { " " } else { icon };
            let used = 2 + label_width + 2 + value.width();
            lines.push(Line::from(vec![
                Span::styled("│ ", border),
                Span::styled(format!("{} ", icon), Style::default().fg(color)),
                Span::styled(format!("{:<width$}  ", label, width = label_width), Style::default().fg(Theme::GRAY)),
                Span::styled(value, Style::default().fg(color).add_modifier(Modifier::UNDERLINED)),
                Span::raw(" ".repeat(inner - used)),
                Span::styled(" │", border),
            ]));
        }

        lines.push(Line::from(Span::styled(format!("╰{}╯", "─".repeat(inner + 2)), border)));
        lines
    }
}
