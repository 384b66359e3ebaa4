use crate::theme::Theme;

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use termfolio_core::ProfileSummary;
use unicode_width::UnicodeWidthStr;

/// Gap between the art column and the details
const GUTTER: usize = 3;

/// `fastfetch` output: ASCII art beside a device summary
///
/// ```text
///    ____  ____      Daroh Sou
///   |  _ \/ ___|     Software Engineer
///   | | | \___ \     -----------------
///   | |_| |___) |    OS: Linux
/// ```
pub struct ProfileCard<'a> {
    summary: &'a ProfileSummary,
}

impl<'a> ProfileCard<'a> {
    pub fn new(summary: &'a ProfileSummary) -> Self {
        Self { summary }
    }

    /// Rows of the card, art on the left
    pub fn lines(&self) -> Vec<Line<'static>> {
        let art: Vec<&str> = self.summary.art.lines().collect();
        let art_width = art.iter().map(|line| line.width()).max().unwrap_or(0);
        let details = self.details();
        let rows = art.len().max(details.len());

        (0..rows)
            .map(|row| {
                let mut spans = Vec::new();
                if art_width > 0 {
                    let art_line = art.get(row).copied().unwrap_or("");
                    let padding = art_width + GUTTER - art_line.width();
                    spans.push(Span::styled(art_line.to_string(), Style::default().fg(Theme::CYAN)));
                    spans.push(Span::raw(" ".repeat(padding)));
                }
                if let Some(detail) = details.get(row) {
                    spans.extend(detail.spans.iter().cloned());
                }
                Line::from(spans)
            })
            .collect()
    }

    fn details(&self) -> Vec<Line<'static>> {
        let summary = self.summary;
        let device = &summary.device;
        let heading = format!("{} | {}", summary.name, summary.title);

        let mut lines = vec![
            Line::from(Span::styled(
                summary.name.clone(),
                Style::default().fg(Theme::GREEN).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(summary.title.clone(), Style::default().fg(Theme::WHITE))),
            Line::from(Span::styled("-".repeat(heading.width().min(40)), Style::default().fg(Theme::MUTED))),
        ];

        let fields = [
            ("OS", device.os.clone()),
            ("Kernel", device.kernel.clone()),
            ("Uptime", device.uptime.clone()),
            ("Shell", device.shell.clone()),
            ("Terminal", device.terminal.clone()),
            ("Resolution", device.resolution.clone()),
            ("Color Depth", device.color_depth.clone()),
            ("Pixel Ratio", format!("{}", device.pixel_ratio)),
            ("Device", device.device_type.clone()),
            ("Platform", device.platform.clone()),
            ("CPU", device.cpu.clone()),
            ("GPU", device.gpu.clone()),
            ("Memory", device.memory.clone()),
            ("Timezone", device.timezone.clone()),
            ("Language", device.language.clone()),
            ("Languages", device.languages.clone()),
        ];
        lines.extend(fields.into_iter().map(|(label, value)| field(label, value)));

        lines.push(Line::default());
        lines.push(field("Email", summary.contact.email.clone()));
        lines.push(field("GitHub", summary.contact.github_url()));
        lines.push(field("LinkedIn", summary.contact.linkedin_url()));

        lines.push(Line::default());
        lines.push(palette());
        lines
    }
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Theme::YELLOW).add_modifier(Modifier::BOLD)),
        Span::styled(value, Style::default().fg(Theme::FG)),
    ])
}

fn palette() -> Line<'static> {
    let colors = [Theme::RED, Theme::YELLOW, Theme::GREEN, Theme::CYAN, Theme::BLUE, Theme::INDIGO, Theme::WHITE];
    Line::from(colors.into_iter().map(|color| Span::styled("███", Style::default().fg(color))).collect::<Vec<_>>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use termfolio_core::{EnvironmentSignals, Portfolio, probe};

    fn summary() -> ProfileSummary {
        let signals = EnvironmentSignals {
            user_agent: "termfolio/0.1.0 (X11; Linux x86_64) shell/zsh term/kitty".to_string(),
            hardware_concurrency: Some(8),
            ..Default::default()
        }
        .with_screen(120, 40);
        ProfileSummary::new(&Portfolio::builtin(), probe(&signals))
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_art_and_details_side_by_side() {
        let summary = summary();
        let lines = ProfileCard::new(&summary).lines();
        let first = text(&lines[0]);
        let art_first = summary.art.lines().next().unwrap();
        assert!(first.starts_with(art_first));
        assert!(first.ends_with(&summary.name));
    }

    #[test]
    fn test_device_fields_listed() {
        let summary = summary();
        let all: Vec<String> = ProfileCard::new(&summary).lines().iter().map(text).collect();
        assert!(all.iter().any(|l| l.contains("OS: Linux")));
        assert!(all.iter().any(|l| l.contains("Resolution: 120x40")));
        assert!(all.iter().any(|l| l.contains("CPU: 8 cores")));
        assert!(all.iter().any(|l| l.contains("Shell: zsh")));
        assert!(all.iter().any(|l| l.contains(&format!("GitHub: {}", summary.contact.github_url()))));
    }

    #[test]
    fn test_without_art() {
        let mut summary = summary();
        summary.art.clear();
        let lines = ProfileCard::new(&summary).lines();
        assert_eq!(text(&lines[0]), summary.name);
    }
}
