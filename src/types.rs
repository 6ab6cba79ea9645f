//! Domain types for number-gauge.
//!
//! Closed enums only. Every value reachable through the public surface
//! is valid by construction, so nothing here returns an error.

use std::time::Duration;

use serde::Serialize;

// ============================================================================
// THEMES
// ============================================================================

/// The theme the user selected.
///
/// `System` delegates to the OS colour-scheme preference; every other
/// variant is applied literally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
    LowContrast,
    HighContrast,
}

/// The theme marker actually applied to the styling scope.
///
/// `System` never appears here: it is resolved to `Light` or `Dark` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedTheme {
    Light,
    Dark,
    LowContrast,
    HighContrast,
}

/// OS / terminal colour-scheme preference ("prefers dark").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    /// Also the answer when nothing can be detected.
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        }
    }
}

impl Theme {
    /// Stable kebab-case key, as accepted on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
            Theme::LowContrast => "low-contrast",
            Theme::HighContrast => "high-contrast",
        }
    }

    /// Resolve against the current OS preference.
    pub fn resolve(self, scheme: ColorScheme) -> ResolvedTheme {
        match self {
            Theme::Light => ResolvedTheme::Light,
            Theme::Dark => ResolvedTheme::Dark,
            Theme::System => match scheme {
                ColorScheme::Dark => ResolvedTheme::Dark,
                ColorScheme::Light => ResolvedTheme::Light,
            },
            Theme::LowContrast => ResolvedTheme::LowContrast,
            Theme::HighContrast => ResolvedTheme::HighContrast,
        }
    }
}

// ============================================================================
// ICONS
// ============================================================================

/// Icon capability. The renderer only asks for a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Play,
    Pause,
    Dice,
    Menu,
    Sun,
    Moon,
    Monitor,
    Contrast,
    Palette,
    Eye,
    EyeOff,
}

impl Icon {
    /// Single-cell glyph for this icon.
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Play => "▶",
            Icon::Pause => "‖",
            Icon::Dice => "⚄",
            Icon::Menu => "≡",
            Icon::Sun => "☀",
            Icon::Moon => "☾",
            Icon::Monitor => "▣",
            Icon::Contrast => "◐",
            Icon::Palette => "◆",
            Icon::Eye => "○",
            Icon::EyeOff => "ø",
        }
    }
}

// ============================================================================
// THEME OPTIONS
// ============================================================================

/// One selectable entry in the theme section of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeOption {
    pub key: Theme,
    pub label: &'static str,
    pub icon: Icon,
}

/// The five theme options, in menu order.
pub const THEME_OPTIONS: [ThemeOption; 5] = [
    ThemeOption { key: Theme::Light, label: "Light", icon: Icon::Sun },
    ThemeOption { key: Theme::Dark, label: "Dark", icon: Icon::Moon },
    ThemeOption { key: Theme::System, label: "System", icon: Icon::Monitor },
    ThemeOption { key: Theme::LowContrast, label: "Low Contrast", icon: Icon::Contrast },
    ThemeOption { key: Theme::HighContrast, label: "High Contrast", icon: Icon::Palette },
];

// ============================================================================
// BANDS
// ============================================================================

/// Colour family of a number: one per quarter of the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    /// [0, 25)
    Green,
    /// [25, 50)
    Blue,
    /// [50, 75)
    Yellow,
    /// [75, 100)
    Red,
}

impl Band {
    pub fn of(number: u8) -> Self {
        match number {
            0..=24 => Band::Green,
            25..=49 => Band::Blue,
            50..=74 => Band::Yellow,
            _ => Band::Red,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Band::Green => "green",
            Band::Blue => "blue",
            Band::Yellow => "yellow",
            Band::Red => "red",
        }
    }
}

/// Zero-pad to exactly two characters.
pub fn format_number(number: u8) -> String {
    format!("{:02}", number)
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for headless rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

/// Configuration for an interactive session.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Ticker cadence.
    pub interval: Duration,
    /// How often the OS colour-scheme preference is re-read while `System` is selected.
    pub scheme_poll: Duration,
    pub initial_theme: Theme,
    pub start_running: bool,
    pub show_gauge: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1000),
            scheme_poll: Duration::from_millis(2000),
            initial_theme: Theme::System,
            start_running: true,
            show_gauge: true,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries() {
        assert_eq!(Band::of(0), Band::Green);
        assert_eq!(Band::of(24), Band::Green);
        assert_eq!(Band::of(25), Band::Blue);
        assert_eq!(Band::of(49), Band::Blue);
        assert_eq!(Band::of(50), Band::Yellow);
        assert_eq!(Band::of(74), Band::Yellow);
        assert_eq!(Band::of(75), Band::Red);
        assert_eq!(Band::of(99), Band::Red);
    }

    #[test]
    fn numbers_are_zero_padded_to_two_chars() {
        assert_eq!(format_number(0), "00");
        assert_eq!(format_number(7), "07");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(99), "99");
        for n in 0..=99u8 {
            assert_eq!(format_number(n).len(), 2);
        }
    }

    #[test]
    fn system_theme_follows_scheme() {
        assert_eq!(Theme::System.resolve(ColorScheme::Dark), ResolvedTheme::Dark);
        assert_eq!(Theme::System.resolve(ColorScheme::Light), ResolvedTheme::Light);
    }

    #[test]
    fn literal_themes_ignore_scheme() {
        for scheme in [ColorScheme::Light, ColorScheme::Dark] {
            assert_eq!(Theme::Light.resolve(scheme), ResolvedTheme::Light);
            assert_eq!(Theme::Dark.resolve(scheme), ResolvedTheme::Dark);
            assert_eq!(Theme::LowContrast.resolve(scheme), ResolvedTheme::LowContrast);
            assert_eq!(Theme::HighContrast.resolve(scheme), ResolvedTheme::HighContrast);
        }
    }

    #[test]
    fn theme_options_cover_every_theme_once() {
        let keys: Vec<Theme> = THEME_OPTIONS.iter().map(|o| o.key).collect();
        assert_eq!(
            keys,
            vec![
                Theme::Light,
                Theme::Dark,
                Theme::System,
                Theme::LowContrast,
                Theme::HighContrast
            ]
        );
    }

    #[test]
    fn default_theme_is_system() {
        assert_eq!(Theme::default(), Theme::System);
        assert_eq!(RunConfig::default().initial_theme, Theme::System);
        assert_eq!(RunConfig::default().interval, Duration::from_millis(1000));
    }

    #[test]
    fn theme_keys_are_kebab_case() {
        assert_eq!(Theme::LowContrast.key(), "low-contrast");
        assert_eq!(Theme::HighContrast.key(), "high-contrast");
    }
}
