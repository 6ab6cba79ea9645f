//! Pure state transitions: (DisplayState, Action) → Transition.
//!
//! This is the core logic of the TUI. Fully testable without a terminal.
//! Every menu selection closes the menu in the same transition.

use super::state::{Action, DisplayState, Effect, MenuItem, MenuState, Transition, MENU_ITEMS};

/// Pure state transition function.
pub fn update(state: DisplayState, action: &Action) -> Transition {
    match action {
        Action::Quit => Transition::Quit,
        Action::TogglePlay => {
            let mut next = state;
            next.set_running(!state.is_running);
            Transition::State(next)
        }
        Action::GenerateNow => Transition::Effect(Effect::Draw),
        Action::ToggleMenu => {
            let mut next = state;
            if state.menu.is_open() {
                next.close_menu();
            } else {
                next.open_menu();
            }
            Transition::State(next)
        }
        Action::CloseMenu => Transition::State(DisplayState {
            menu: MenuState::Closed,
            ..state
        }),
        Action::ToggleGauge => select(state, MenuItem::ToggleGauge),
        Action::SelectTheme(theme) => select(state, MenuItem::Theme(*theme)),
        Action::MenuUp => move_cursor(state, |c| c.saturating_sub(1)),
        Action::MenuDown => move_cursor(state, |c| (c + 1).min(MENU_ITEMS.len() - 1)),
        Action::MenuActivate => match state.menu {
            MenuState::Open { cursor } => match MENU_ITEMS.get(cursor) {
                Some(item) => select(state, *item),
                None => Transition::State(state),
            },
            MenuState::Closed => Transition::State(state),
        },
    }
}

/// A ticker fire: replace the number only while running.
pub fn on_tick(state: DisplayState, drawn: u8) -> DisplayState {
    if state.is_running {
        let mut next = state;
        next.set_number(drawn);
        next
    } else {
        state
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Perform a menu item's action and close the menu.
fn select(state: DisplayState, item: MenuItem) -> Transition {
    let mut next = state;
    match item {
        MenuItem::ToggleGauge => next.set_show_gauge(!state.show_gauge),
        MenuItem::Theme(theme) => next.set_theme(theme),
    }
    next.close_menu();
    Transition::State(next)
}

/// Cursor movement is a no-op while the menu is closed.
fn move_cursor(state: DisplayState, step: impl Fn(usize) -> usize) -> Transition {
    match state.menu {
        MenuState::Open { cursor } => Transition::State(DisplayState {
            menu: MenuState::Open { cursor: step(cursor) },
            ..state
        }),
        MenuState::Closed => Transition::State(state),
    }
}

// ============================================================================
// TESTS
// ============================================================================
