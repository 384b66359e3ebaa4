//! Convert sanitized output markup into ratatui lines.
//!
//! Only the allow-listed tags matter here. `span` and `a` carry classes that
//! [`Theme::class_style`] understands; `strong`, `em` and `i` add modifiers;
//! `br` and `div` break lines; an `svg` collapses into a single glyph. Runs of
//! ordinary whitespace collapse to one space, `&nbsp;` does not.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use termfolio_core::animator::units;

use crate::theme::Theme;

/// Shown in place of inline vector icons
pub const ICON_GLYPH: &str = "■";

/// Styled lines for one markup string
pub fn to_lines(markup: &str) -> Vec<Line<'static>> {
    let mut renderer = MarkupRenderer::default();
    for unit in units(markup) {
        renderer.unit(unit);
    }
    renderer.finish()
}

/// The same text with styling dropped, lines joined by `\n`
pub fn to_plain_text(markup: &str) -> String {
    to_lines(markup)
        .iter()
        .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Default)]
struct MarkupRenderer {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    text: String,
    styles: Vec<(String, Style)>,
    /// Last emitted character was collapsible whitespace (or the line is fresh)
    after_space: bool,
    svg_depth: usize,
    ended_with_break: bool,
}

impl MarkupRenderer {
    fn unit(&mut self, unit: &str) {
        if unit.len() > 1 && unit.starts_with('<') {
            self.tag(unit);
            return;
        }

        self.ended_with_break = false;
        if self.svg_depth > 0 {
            return;
        }

        if unit.len() > 1 && unit.starts_with('&') {
            match decode_entity(unit) {
                Some(' ') => self.push_hard_space(),
                Some(c) => self.push_char(c),
                None => unit.chars().for_each(|c| self.push_char(c)),
            }
            return;
        }

        for c in unit.chars() {
            match c {
                '\u{a0}' => self.push_hard_space(),
                c if c.is_whitespace() => {
                    if !self.after_space && !self.line_is_empty() {
                        self.push_char(' ');
                        self.after_space = true;
                    }
                }
                c => self.push_char(c),
            }
        }
    }

    fn push_char(&mut self, c: char) {
        self.text.push(c);
        self.after_space = false;
    }

    fn push_hard_space(&mut self) {
        self.text.push(' ');
        self.after_space = false;
    }

    fn line_is_empty(&self) -> bool {
        self.text.is_empty() && self.spans.is_empty()
    }

    fn current_style(&self) -> Style {
        self.styles.iter().fold(Style::default(), |style, (_, patch)| style.patch(*patch))
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.spans.push(Span::styled(text, self.current_style()));
        }
    }

    fn break_line(&mut self) {
        self.flush_text();
        self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        self.after_space = true;
    }

    fn tag(&mut self, tag: &str) {
        let closing = tag.starts_with("</");
        let self_closing = tag.ends_with("/>");
        let name = tag_name(tag);

        if self.svg_depth > 0 {
            match name.as_str() {
                "svg" if closing => self.svg_depth -= 1,
                "svg" if !self_closing => self.svg_depth += 1,
                _ => {}
            }
            return;
        }

        self.flush_text();
        match name.as_str() {
            "br" => {
                self.break_line();
                self.ended_with_break = true;
                return;
            }
            "div" => {
                if !self.line_is_empty() {
                    self.break_line();
                }
            }
            "svg" if !closing => {
                let style = self.current_style().patch(Theme::class_style(attribute(tag, "class").unwrap_or("")));
                self.spans.push(Span::styled(ICON_GLYPH, style));
                self.after_space = false;
                if !self_closing {
                    self.svg_depth += 1;
                }
            }
            "span" | "a" | "strong" | "em" | "i" if closing => {
                if let Some(pos) = self.styles.iter().rposition(|(open, _)| *open == name) {
                    self.styles.truncate(pos);
                }
            }
            "span" | "a" | "strong" | "em" | "i" if !self_closing => {
                let classes = Theme::class_style(attribute(tag, "class").unwrap_or(""));
                let patch = match name.as_str() {
                    "strong" => classes.add_modifier(Modifier::BOLD),
                    "em" | "i" => classes.add_modifier(Modifier::ITALIC),
                    "a" => classes.add_modifier(Modifier::UNDERLINED),
                    _ => classes,
                };
                self.styles.push((name, patch));
            }
            _ => {}
        }
        self.ended_with_break = false;
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_text();
        let trailing_break = self.ended_with_break && self.spans.is_empty() && !self.lines.is_empty();
        if !trailing_break {
            self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        }
        self.lines
    }
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('<')
        .trim_start_matches('/')
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Value of a quoted attribute inside a tag
fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let mut search = 0;
    while let Some(found) = tag[search..].find(name) {
        let start = search + found;
        search = start + name.len();

        let preceded_by_space = tag[..start].ends_with(char::is_whitespace);
        let rest = tag[search..].trim_start();
        if !preceded_by_space || !rest.starts_with('=') {
            continue;
        }

        let value = rest[1..].trim_start();
        let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        let value = &value[1..];
        return value.find(quote).map(|end| &value[..end]);
    }
    None
}

fn decode_entity(entity: &str) -> Option<char> {
    let body = entity.strip_prefix('&')?.strip_suffix(';')?;
    match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = body.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}
