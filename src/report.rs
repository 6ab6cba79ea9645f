//! Formatting for headless rolls.
//!
//! Pure functions: (draws, OutputFormat) → String.
//! No I/O, no side effects.

use serde::Serialize;

use crate::types::{format_number, Band, OutputFormat};

/// One drawn number, as reported by `roll`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roll {
    pub number: u8,
    pub padded: String,
    pub band: Band,
    /// Gauge fill, equal to the number.
    pub percent: u8,
}

impl Roll {
    pub fn new(number: u8) -> Self {
        let number = number.min(99);
        Roll {
            number,
            padded: format_number(number),
            band: Band::of(number),
            percent: number,
        }
    }
}

/// Format rolls for output.
pub fn format_rolls(rolls: &[Roll], format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(rolls),
        OutputFormat::Json => format_json(rolls),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(rolls: &[Roll]) -> String {
    let mut out = String::new();
    for roll in rolls {
        out.push_str(&format!("{}  {}\n", roll.padded, roll.band.name()));
    }
    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(rolls: &[Roll]) -> String {
    serde_json::to_string_pretty(rolls).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_derives_padding_and_band() {
        let roll = Roll::new(7);
        assert_eq!(roll.padded, "07");
        assert_eq!(roll.band, Band::Green);
        assert_eq!(roll.percent, 7);
    }

    #[test]
    fn human_format_one_line_per_roll() {
        let out = format_rolls(&[Roll::new(7), Roll::new(75)], OutputFormat::Human);
        assert_eq!(out, "07  green\n75  red\n");
    }

    #[test]
    fn json_format_uses_lowercase_band_names() {
        let out = format_rolls(&[Roll::new(42)], OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["number"], 42);
        assert_eq!(parsed[0]["padded"], "42");
        assert_eq!(parsed[0]["band"], "blue");
        assert_eq!(parsed[0]["percent"], 42);
    }

    #[test]
    fn empty_rolls_format_cleanly() {
        assert_eq!(format_rolls(&[], OutputFormat::Human), "");
        assert_eq!(format_rolls(&[], OutputFormat::Json), "[]");
    }
}
