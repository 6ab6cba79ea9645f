//! Uniform random source for the displayed number.
//!
//! The draw is `floor(unit * 100)` for a unit sample in `[0, 1)`.
//! The source is a trait so tests can feed fixed samples.

use rand::Rng;

/// Exclusive upper bound of a draw.
pub const NUMBER_RANGE: u8 = 100;

/// Something that yields uniform samples in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Default source backed by the thread-local RNG.
#[derive(Debug, Default)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().r#gen::<f64>()
    }
}

/// Draw a number in `0..=99`.
///
/// Samples outside `[0, 1)` (a misbehaving source) are clamped into range.
pub fn draw_number(source: &mut dyn RandomSource) -> u8 {
    let scaled = (source.next_unit() * f64::from(NUMBER_RANGE)).floor();
    scaled.clamp(0.0, f64::from(NUMBER_RANGE - 1)) as u8
}

// ============================================================================
// TESTS
// ============================================================================
