//! World map with animated flight arcs, shown by the `globe` command.

use crate::theme::Theme;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders,
        canvas::{Canvas, Map, MapResolution, Points},
    },
};
use std::f64::consts::PI;

/// Frames for one dash to travel its arc
pub const PERIOD: u64 = 48;

const SAMPLES: usize = 48;

/// Degrees of latitude per unit of arc altitude
const LIFT: f64 = 40.0;

/// A connection between two cities, `(lat, lng)` in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub altitude: f64,
}

const fn route(from: (f64, f64), to: (f64, f64), altitude: f64) -> Route {
    Route { from, to, altitude }
}

pub const ROUTES: &[Route] = &[
    route((-19.885592, -43.951191), (-22.9068, -43.1729), 0.1),
    route((28.6139, 77.209), (3.139, 101.6869), 0.2),
    route((-19.885592, -43.951191), (-1.303396, 36.852443), 0.5),
    route((1.3521, 103.8198), (35.6762, 139.6503), 0.2),
    route((51.5072, -0.1276), (3.139, 101.6869), 0.3),
    route((-15.785493, -47.909029), (36.162809, -115.119411), 0.3),
    route((-33.8688, 151.2093), (22.3193, 114.1694), 0.3),
    route((21.3099, -157.8581), (40.7128, -74.006), 0.3),
    route((-6.2088, 106.8456), (51.5072, -0.1276), 0.3),
    route((11.986597, 8.571831), (-15.595412, -56.05918), 0.5),
    route((-34.6037, -58.3816), (22.3193, 114.1694), 0.7),
    route((51.5072, -0.1276), (48.8566, -2.3522), 0.1),
    route((14.5995, 120.9842), (51.5072, -0.1276), 0.3),
    route((1.3521, 103.8198), (-33.8688, 151.2093), 0.2),
    route((34.0522, -118.2437), (48.8566, -2.3522), 0.2),
];

const ROUTE_COLORS: [Color; 3] = [Theme::CYAN, Theme::BLUE, Theme::INDIGO];

impl Route {
    /// Canvas position `(x = lng, y = lat)` at `t` in `[0, 1]`
    pub fn point_at(&self, t: f64) -> (f64, f64) {
        let lat = self.from.0 + (self.to.0 - self.from.0) * t + self.altitude * LIFT * (PI * t).sin();
        let lng = self.from.1 + (self.to.1 - self.from.1) * t;
        (lng, lat.clamp(-90.0, 90.0))
    }

    /// The visible dash for `frame`, offset per arc so they do not move in step
    pub fn dash(&self, index: usize, frame: u64) -> Vec<(f64, f64)> {
        let phase = ((frame + index as u64 * 7) % PERIOD) as f64 / PERIOD as f64;
        let head = (phase * 1.5).min(1.0);
        let tail = (phase * 1.5 - 0.5).clamp(0.0, head);
        (0..=SAMPLES)
            .map(|i| self.point_at(tail + (head - tail) * i as f64 / SAMPLES as f64))
            .collect()
    }
}

pub struct Globe {
    frame: u64,
}

impl Globe {
    pub fn new(frame: u64) -> Self {
        Self { frame }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let title = Line::from(vec![
            Span::styled(" globe ", Style::default().fg(Theme::GREEN)),
            Span::styled("[Esc] return ", Theme::muted()),
        ]);
        let dashes: Vec<Vec<(f64, f64)>> =
            ROUTES.iter().enumerate().map(|(index, arc)| arc.dash(index, self.frame)).collect();
        let cities: Vec<(f64, f64)> =
            ROUTES.iter().flat_map(|arc| [(arc.from.1, arc.from.0), (arc.to.1, arc.to.0)]).collect();

        let canvas = Canvas::default()
            .block(Block::default().borders(Borders::ALL).border_style(Theme::border()).title(title))
            .background_color(Theme::BG)
            .marker(Marker::Braille)
            .x_bounds([-180.0, 180.0])
            .y_bounds([-90.0, 90.0])
            .paint(|ctx| {
                ctx.draw(&Map { color: Theme::LAND, resolution: MapResolution::High });
                ctx.layer();
                for (index, dash) in dashes.iter().enumerate() {
                    ctx.draw(&Points { coords: dash, color: ROUTE_COLORS[index % ROUTE_COLORS.len()] });
                }
                ctx.draw(&Points { coords: &cities, color: Theme::WHITE });
            });
        frame.render_widget(canvas, area);
    }
}
