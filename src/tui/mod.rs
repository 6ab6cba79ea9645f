//! TUI module for the interactive widget.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (DisplayState, Action, Transition)
//! - `update`: Pure transitions
//! - `layout`: Pure geometry, shared by rendering and hit-testing
//! - `view`: Pure rendering
//! - `theme`: Palettes and the styling scope
//! - `subscriptions`: Ticker, scheme watcher, outside-click watcher
//! - `run`: Effects (terminal, event loop)

pub mod layout;
pub mod run;
pub mod state;
pub mod subscriptions;
pub mod theme;
pub mod update;
pub mod view;
