//! TUI state algebra: pure types, zero effects.
//!
//! `DisplayState` is the whole view state of the widget. The transition
//! function and the renderer both program against it. It is `Copy`, so
//! a transition never tears a half-updated state.

use crossterm::event::{KeyEvent, MouseEvent};

use crate::platform::ColorSchemeSource;
use crate::types::{ColorScheme, RunConfig, Theme, THEME_OPTIONS};

use super::theme::ThemeScope;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Three kinds of producers feed a single mpsc channel:
/// - The input reader thread sends `Key`, `Mouse` and `Resize`
/// - The ticker sends `Tick`
/// - The scheme watcher sends `SchemeChanged`
///
/// Subscription events carry the token of the subscription that sent
/// them. Tokens of cancelled subscriptions are never live again.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    Tick { token: u64 },
    SchemeChanged { token: u64, scheme: ColorScheme },
}

// ============================================================================
// MENU
// ============================================================================

/// Menu visibility. The cursor is the keyboard highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open { cursor: usize },
}

impl MenuState {
    pub fn is_open(self) -> bool {
        matches!(self, MenuState::Open { .. })
    }

    pub fn cursor(self) -> Option<usize> {
        match self {
            MenuState::Open { cursor } => Some(cursor),
            MenuState::Closed => None,
        }
    }
}

/// Selectable menu entries. The divider is not an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    ToggleGauge,
    Theme(Theme),
}

/// Menu entries in display order: gauge toggle, then one per theme option.
pub const MENU_ITEMS: [MenuItem; 6] = [
    MenuItem::ToggleGauge,
    MenuItem::Theme(THEME_OPTIONS[0].key),
    MenuItem::Theme(THEME_OPTIONS[1].key),
    MenuItem::Theme(THEME_OPTIONS[2].key),
    MenuItem::Theme(THEME_OPTIONS[3].key),
    MenuItem::Theme(THEME_OPTIONS[4].key),
];

// ============================================================================
// DISPLAY STATE
// ============================================================================

/// The widget's view state. One instance, fresh on every launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayState {
    /// Always in `0..=99`.
    pub number: u8,
    pub is_running: bool,
    pub show_gauge: bool,
    pub theme: Theme,
    pub menu: MenuState,
}

impl DisplayState {
    /// Initial state: the given first draw, flags from config, menu closed.
    pub fn new(number: u8, config: &RunConfig) -> Self {
        DisplayState {
            number: number.min(99),
            is_running: config.start_running,
            show_gauge: config.show_gauge,
            theme: config.initial_theme,
            menu: MenuState::Closed,
        }
    }

    pub fn set_number(&mut self, number: u8) {
        self.number = number.min(99);
    }

    pub fn set_running(&mut self, running: bool) {
        self.is_running = running;
    }

    pub fn set_show_gauge(&mut self, show: bool) {
        self.show_gauge = show;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Open with the cursor on the first item.
    pub fn open_menu(&mut self) {
        self.menu = MenuState::Open { cursor: 0 };
    }

    pub fn close_menu(&mut self) {
        self.menu = MenuState::Closed;
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key and mouse events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Play/pause button.
    TogglePlay,
    /// Draw a new number now, outside the ticker cadence.
    GenerateNow,
    /// Menu button.
    ToggleMenu,
    /// Outside click or Esc.
    CloseMenu,
    /// Gauge item (closes the menu).
    ToggleGauge,
    /// Theme item (closes the menu).
    SelectTheme(Theme),
    MenuUp,
    MenuDown,
    /// Activate the item under the menu cursor.
    MenuActivate,
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
///
/// Follows the Elm/TEA pattern: pure code describes WHAT should happen,
/// the effects layer decides HOW.
#[derive(Debug, PartialEq, Eq)]
pub enum Transition {
    /// Replace the state with this one.
    State(DisplayState),
    Quit,
    /// Keep the state and execute a side effect.
    Effect(Effect),
}

/// Side effect requested by a pure transition.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    /// Replace the number with a fresh draw. Leaves the ticker alone.
    Draw,
}

// ============================================================================
// APPLICATION
// ============================================================================

/// Top-level TUI model: the view state plus the applied theme marker.
#[derive(Debug)]
pub struct App {
    pub state: DisplayState,

    /// Last known OS preference, used to resolve `Theme::System`.
    pub scheme: ColorScheme,

    /// The styling scope the renderer reads.
    pub scope: ThemeScope,

    /// Set to true when the app should exit on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Create an App and apply its initial theme.
    pub fn new(number: u8, config: &RunConfig, scheme: ColorScheme) -> Self {
        let mut app = App {
            state: DisplayState::new(number, config),
            scheme,
            scope: ThemeScope::default(),
            should_quit: false,
        };
        app.apply_theme();
        app
    }

    /// Resolve the selected theme and apply it to the scope.
    ///
    /// The single place the marker is written. Returns whether it changed.
    pub fn apply_theme(&mut self) -> bool {
        self.scope.apply(self.state.theme.resolve(self.scheme))
    }

    /// Replace the view state, re-reading the OS preference when
    /// `System` has just been selected, then re-apply the theme.
    pub fn replace_state(&mut self, next: DisplayState, source: &dyn ColorSchemeSource) {
        let entering_system = next.theme == Theme::System && self.state.theme != Theme::System;
        self.state = next;
        if entering_system {
            self.scheme = source.scheme();
        }
        self.apply_theme();
    }

    /// A new OS preference arrived while `System` is selected.
    pub fn set_scheme(&mut self, scheme: ColorScheme) -> bool {
        self.scheme = scheme;
        self.apply_theme()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResolvedTheme;

    struct Fixed(bool);

    impl ColorSchemeSource for Fixed {
        fn prefers_dark(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn initial_state_follows_config() {
        let state = DisplayState::new(42, &RunConfig::default());
        assert_eq!(state.number, 42);
        assert!(state.is_running);
        assert!(state.show_gauge);
        assert_eq!(state.theme, Theme::System);
        assert_eq!(state.menu, MenuState::Closed);
    }

    #[test]
    fn numbers_are_clamped_into_range() {
        let mut state = DisplayState::new(250, &RunConfig::default());
        assert_eq!(state.number, 99);
        state.set_number(100);
        assert_eq!(state.number, 99);
        state.set_number(3);
        assert_eq!(state.number, 3);
    }

    #[test]
    fn open_menu_resets_cursor() {
        let mut state = DisplayState::new(0, &RunConfig::default());
        state.menu = MenuState::Open { cursor: 4 };
        state.close_menu();
        state.open_menu();
        assert_eq!(state.menu.cursor(), Some(0));
    }

    #[test]
    fn menu_items_start_with_gauge_toggle_then_themes() {
        assert_eq!(MENU_ITEMS[0], MenuItem::ToggleGauge);
        assert_eq!(MENU_ITEMS[1], MenuItem::Theme(Theme::Light));
        assert_eq!(MENU_ITEMS[5], MenuItem::Theme(Theme::HighContrast));
    }

    #[test]
    fn new_app_applies_system_theme_from_scheme() {
        let app = App::new(10, &RunConfig::default(), ColorScheme::Dark);
        assert_eq!(app.scope.marker(), Some(ResolvedTheme::Dark));
    }

    #[test]
    fn entering_system_rereads_preference() {
        let config = RunConfig {
            initial_theme: Theme::Light,
            ..RunConfig::default()
        };
        let mut app = App::new(10, &config, ColorScheme::Light);
        let mut next = app.state;
        next.theme = Theme::System;
        app.replace_state(next, &Fixed(true));
        assert_eq!(app.scheme, ColorScheme::Dark);
        assert_eq!(app.scope.marker(), Some(ResolvedTheme::Dark));
    }

    #[test]
    fn literal_theme_ignores_scheme_changes() {
        let config = RunConfig {
            initial_theme: Theme::HighContrast,
            ..RunConfig::default()
        };
        let mut app = App::new(10, &config, ColorScheme::Light);
        assert!(!app.set_scheme(ColorScheme::Dark));
        assert_eq!(app.scope.marker(), Some(ResolvedTheme::HighContrast));
    }
}
