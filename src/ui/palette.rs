//! Dark and light color palettes.

use ratatui::style::Color;

/// Colors used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Canvas background.
    pub base: Color,
    /// Primary text.
    pub text: Color,
    /// Secondary text.
    pub subtext: Color,
    /// Borders of unfocused panes.
    pub overlay: Color,
    /// Focused borders and headings.
    pub accent: Color,
    /// Selected row background.
    pub highlight: Color,
    /// Favorite marker.
    pub yellow: Color,
    /// Loading indicator.
    pub green: Color,
    /// Error banner.
    pub red: Color,
}

/// Catppuccin Mocha.
pub const DARK: Palette = Palette {
    base: Color::Rgb(0x1e, 0x1e, 0x2e),
    text: Color::Rgb(0xcd, 0xd6, 0xf4),
    subtext: Color::Rgb(0xa6, 0xad, 0xc8),
    overlay: Color::Rgb(0x7f, 0x84, 0x9c),
    accent: Color::Rgb(0xcb, 0xa6, 0xf7),
    highlight: Color::Rgb(0x45, 0x47, 0x5a),
    yellow: Color::Rgb(0xf9, 0xe2, 0xaf),
    green: Color::Rgb(0xa6, 0xe3, 0xa1),
    red: Color::Rgb(0xf3, 0x8b, 0xa8),
};

/// Catppuccin Latte.
pub const LIGHT: Palette = Palette {
    base: Color::Rgb(0xef, 0xf1, 0xf5),
    text: Color::Rgb(0x4c, 0x4f, 0x69),
    subtext: Color::Rgb(0x6c, 0x6f, 0x85),
    overlay: Color::Rgb(0x8c, 0x8f, 0xa1),
    accent: Color::Rgb(0x88, 0x39, 0xef),
    highlight: Color::Rgb(0xcc, 0xd0, 0xda),
    yellow: Color::Rgb(0xdf, 0x8e, 0x1d),
    green: Color::Rgb(0x40, 0xa0, 0x2b),
    red: Color::Rgb(0xd2, 0x0f, 0x39),
};

/// Palette for the stored theme preference.
#[must_use]
pub const fn palette(light: bool) -> &'static Palette {
    if light { &LIGHT } else { &DARK }
}
