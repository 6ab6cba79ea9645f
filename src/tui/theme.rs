//! TUI colour palettes and the theme styling scope.
//!
//! Pure data plus one small holder. The renderer never looks at the
//! selected `Theme` directly: it reads whichever palette the scope holds.
//!
//! Color semantics:
//! - Band colours: green, blue, yellow, red by quarter of the range
//! - Accent: the play button and the highlighted menu item
//! - Secondary text: the percent label and the help line

use ratatui::style::{Color, Modifier, Style};

use crate::types::{Band, ResolvedTheme};

// ============================================================================
// PALETTES
// ============================================================================

/// Every colour the renderer needs for one resolved theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub accent_text: Color,
    pub gauge_track: Color,
    /// Indexed by band: green, blue, yellow, red.
    pub bands: [Color; 4],
}

pub const LIGHT: Palette = Palette {
    background: Color::Rgb(241, 245, 249),
    surface: Color::Rgb(255, 255, 255),
    border: Color::Rgb(203, 213, 225),
    text_primary: Color::Rgb(15, 23, 42),
    text_secondary: Color::Rgb(100, 116, 139),
    accent: Color::Rgb(59, 130, 246),
    accent_text: Color::Rgb(255, 255, 255),
    gauge_track: Color::Rgb(226, 232, 240),
    bands: [
        Color::Rgb(34, 197, 94),
        Color::Rgb(59, 130, 246),
        Color::Rgb(234, 179, 8),
        Color::Rgb(239, 68, 68),
    ],
};

pub const DARK: Palette = Palette {
    background: Color::Rgb(15, 23, 42),
    surface: Color::Rgb(30, 41, 59),
    border: Color::Rgb(51, 65, 85),
    text_primary: Color::Rgb(241, 245, 249),
    text_secondary: Color::Rgb(148, 163, 184),
    accent: Color::Rgb(99, 102, 241),
    accent_text: Color::Rgb(255, 255, 255),
    gauge_track: Color::Rgb(51, 65, 85),
    bands: [
        Color::Rgb(34, 197, 94),
        Color::Rgb(59, 130, 246),
        Color::Rgb(234, 179, 8),
        Color::Rgb(239, 68, 68),
    ],
};

/// Muted greys, softened band colours.
pub const LOW_CONTRAST: Palette = Palette {
    background: Color::Rgb(68, 72, 80),
    surface: Color::Rgb(82, 87, 96),
    border: Color::Rgb(100, 106, 116),
    text_primary: Color::Rgb(176, 180, 188),
    text_secondary: Color::Rgb(140, 145, 154),
    accent: Color::Rgb(112, 122, 150),
    accent_text: Color::Rgb(210, 214, 220),
    gauge_track: Color::Rgb(100, 106, 116),
    bands: [
        Color::Rgb(110, 160, 120),
        Color::Rgb(110, 135, 175),
        Color::Rgb(175, 160, 100),
        Color::Rgb(175, 110, 110),
    ],
};

/// Pure black and white, saturated band colours.
pub const HIGH_CONTRAST: Palette = Palette {
    background: Color::Black,
    surface: Color::Black,
    border: Color::White,
    text_primary: Color::White,
    text_secondary: Color::White,
    accent: Color::Yellow,
    accent_text: Color::Black,
    gauge_track: Color::DarkGray,
    bands: [
        Color::LightGreen,
        Color::LightCyan,
        Color::LightYellow,
        Color::LightRed,
    ],
};

pub fn palette(theme: ResolvedTheme) -> &'static Palette {
    match theme {
        ResolvedTheme::Light => &LIGHT,
        ResolvedTheme::Dark => &DARK,
        ResolvedTheme::LowContrast => &LOW_CONTRAST,
        ResolvedTheme::HighContrast => &HIGH_CONTRAST,
    }
}

impl Palette {
    pub fn band(&self, band: Band) -> Color {
        let index = match band {
            Band::Green => 0,
            Band::Blue => 1,
            Band::Yellow => 2,
            Band::Red => 3,
        };
        self.bands[index]
    }

    pub fn surface_style(&self) -> Style {
        Style::new().fg(self.text_primary).bg(self.surface)
    }

    pub fn border_style(&self) -> Style {
        Style::new().fg(self.border)
    }

    pub fn secondary_style(&self) -> Style {
        Style::new().fg(self.text_secondary)
    }

    /// Selected theme item and the play button.
    pub fn accent_style(&self) -> Style {
        Style::new().fg(self.accent_text).bg(self.accent)
    }
}

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// The big number.
pub const STYLE_NUMBER: Style = Style::new().add_modifier(Modifier::BOLD);

/// Keyboard cursor row in the menu.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

// ============================================================================
// STYLING SCOPE
// ============================================================================

/// Holds at most one applied theme marker.
///
/// Applying clears the previous marker first, so there is never more
/// than one. Re-applying the same marker is a no-op.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ThemeScope {
    marker: Option<ResolvedTheme>,
}

impl ThemeScope {
    /// Replace the marker. Returns whether it changed.
    pub fn apply(&mut self, theme: ResolvedTheme) -> bool {
        let changed = self.marker != Some(theme);
        self.clear();
        self.marker = Some(theme);
        changed
    }

    pub fn clear(&mut self) {
        self.marker = None;
    }

    pub fn marker(&self) -> Option<ResolvedTheme> {
        self.marker
    }

    /// Palette for the current marker. Dark until something is applied.
    pub fn palette(&self) -> &'static Palette {
        palette(self.marker.unwrap_or(ResolvedTheme::Dark))
    }
}

// ============================================================================
// TESTS
// ============================================================================
