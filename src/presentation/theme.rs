//! Color theme derived from a single accent color.

use coolor::{Hsl, Rgb};
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

const FALLBACK_ACCENT: Color = Color::Yellow;

/// Styles shared by every widget.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Accent color for borders, tabs and highlights.
    pub accent: Color,
    /// Highlighted row in lists and menus.
    pub selection_style: Style,
    /// Secondary text such as separators and hints.
    pub dimmed_style: Style,
    /// Default text.
    pub base_style: Style,
    /// Labels on the footer bar.
    pub label_style: Style,
    /// Key names on the footer bar.
    pub key_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_accent(FALLBACK_ACCENT)
    }
}

impl Theme {
    /// Builds a theme from a color name or hex code.
    #[must_use]
    pub fn new(accent: &str) -> Self {
        Self::from_accent(parse_color(accent))
    }

    /// Builds a theme from an accent color.
    #[must_use]
    pub fn from_accent(accent: Color) -> Self {
        let selection_bg = shade(accent, 0.2, 0.3);
        let key_bg = shade(accent, 0.08, 0.5);

        Self {
            accent,
            selection_style: Style::default()
                .bg(selection_bg)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            dimmed_style: Style::default().fg(Color::DarkGray),
            base_style: Style::default().fg(Color::Reset),
            label_style: Style::default()
                .bg(accent)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            key_style: Style::default().bg(key_bg).fg(Color::White),
        }
    }
}

/// Parses a color name, index or `#rrggbb` code, falling back to yellow.
#[must_use]
pub fn parse_color(s: &str) -> Color {
    let s = s.trim();
    if s.eq_ignore_ascii_case("orange") {
        return Color::Indexed(208);
    }
    Color::from_str(s).unwrap_or(FALLBACK_ACCENT)
}

/// Returns `color` with the given HSL lightness and saturation.
fn shade(color: Color, lightness: f32, saturation: f32) -> Color {
    let (r, g, b) = approximate_rgb(color);
    let mut hsl: Hsl = Rgb::new(r, g, b).to_hsl();
    hsl.l = lightness;
    hsl.s = saturation;
    let rgb = hsl.to_rgb();
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

fn approximate_rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black | Color::Indexed(0) => (0, 0, 0),
        Color::Red | Color::Indexed(1) => (170, 0, 0),
        Color::Green | Color::Indexed(2) => (0, 170, 0),
        Color::Yellow | Color::Indexed(3) => (170, 85, 0),
        Color::Blue | Color::Indexed(4) => (0, 0, 170),
        Color::Magenta | Color::Indexed(5) => (170, 0, 170),
        Color::Cyan | Color::Indexed(6) => (0, 170, 170),
        Color::Gray | Color::Indexed(7) => (170, 170, 170),
        Color::DarkGray | Color::Indexed(8) => (85, 85, 85),
        Color::LightRed | Color::Indexed(9) => (255, 85, 85),
        Color::LightGreen | Color::Indexed(10) => (85, 255, 85),
        Color::LightYellow | Color::Indexed(11) => (255, 255, 85),
        Color::LightBlue | Color::Indexed(12) => (85, 85, 255),
        Color::LightMagenta | Color::Indexed(13) => (255, 85, 255),
        Color::LightCyan | Color::Indexed(14) => (85, 255, 255),
        Color::Indexed(i @ 16..=231) => {
            let i = i - 16;
            let level = |c: u8| if c == 0 { 0 } else { c * 40 + 55 };
            (level(i / 36), level((i / 6) % 6), level(i % 6))
        }
        Color::Indexed(i @ 232..=255) => {
            let v = (i - 232) * 10 + 8;
            (v, v, v)
        }
        _ => (255, 255, 255),
    }
}
