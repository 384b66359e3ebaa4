use ratatui::style::{Color, Modifier, Style};

/// Terminal color theme
///
/// Output markup carries utility classes (`text-green-400`, `font-bold`, ...);
/// [`Theme::class_style`] maps them onto these colors.
#[derive(Debug, Clone, Copy)]
pub struct Theme;

impl Theme {
    /// Primary background
    pub const BG: Color = Color::Rgb(17, 17, 27);

    /// Foreground (plain output)
    pub const FG: Color = Color::Rgb(205, 214, 244);

    /// Panel background (cards)
    pub const PANEL_BG: Color = Color::Rgb(30, 30, 46);

    pub const GREEN: Color = Color::Rgb(74, 222, 128);

    pub const INDIGO: Color = Color::Rgb(99, 102, 241);

    pub const RED: Color = Color::Rgb(248, 113, 113);

    pub const YELLOW: Color = Color::Rgb(250, 204, 21);

    pub const LIGHT_YELLOW: Color = Color::Rgb(253, 224, 71);

    pub const CYAN: Color = Color::Rgb(34, 211, 238);

    pub const BLUE: Color = Color::Rgb(96, 165, 250);

    pub const LIGHT_BLUE: Color = Color::Rgb(147, 197, 253);

    pub const GRAY: Color = Color::Rgb(156, 163, 175);

    pub const WHITE: Color = Color::Rgb(243, 244, 246);

    /// Muted text (hints, dim chrome)
    pub const MUTED: Color = Color::Rgb(108, 112, 134);

    pub const BORDER: Color = Color::Rgb(69, 71, 90);

    /// Land on the globe map
    pub const LAND: Color = Color::Rgb(59, 130, 246);

    /// Base style for all text
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED).bg(Self::BG)
    }

    pub fn panel() -> Style {
        Style::default().fg(Self::FG).bg(Self::PANEL_BG)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Key hint style in the footer
    pub fn key() -> Style {
        Style::default().fg(Self::BLUE).bg(Self::BG)
    }

    /// Color for a single `text-*` class
    pub fn class_color(class: &str) -> Option<Color> {
        let color = match class {
            "text-green-400" => Self::GREEN,
            "text-indigo-500" => Self::INDIGO,
            "text-red" | "text-red-400" => Self::RED,
            "text-yellow-400" => Self::YELLOW,
            "text-yellow-300" => Self::LIGHT_YELLOW,
            "text-cyan-400" => Self::CYAN,
            "text-blue-400" => Self::BLUE,
            "text-blue-300" => Self::LIGHT_BLUE,
            "text-gray-400" => Self::GRAY,
            "text-white" | "text-white-300" => Self::WHITE,
            _ => return None,
        };
        Some(color)
    }

    /// Fold a `class` attribute into a style patch
    ///
    /// Unknown classes (hover states, layout utilities) are ignored.
    pub fn class_style(classes: &str) -> Style {
        classes.split_whitespace().fold(Style::default(), |style, class| match class {
            "font-bold" => style.add_modifier(Modifier::BOLD),
            "italic" => style.add_modifier(Modifier::ITALIC),
            "underline" => style.add_modifier(Modifier::UNDERLINED),
            other => match Self::class_color(other) {
                Some(color) => style.fg(color),
                None => style,
            },
        })
    }
}
