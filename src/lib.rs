//! number-gauge: a ticking random number with a gauge, a menu, and themes.

pub mod logging;
pub mod platform;
pub mod random;
pub mod report;
pub mod tui;
pub mod types;
