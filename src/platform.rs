//! OS colour-scheme detection ("prefers dark").
//!
//! Encodes where each platform keeps the preference as named constants.
//!
//! Structure:
//! - Constants: commands, keys, environment variables
//! - Types: probe errors, the source trait
//! - Pure functions: parsing probe output
//! - Effect functions: running the probes

#[cfg(unix)]
use std::process::Command;

use tracing::debug;

use crate::types::ColorScheme;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Explicit override: `dark` or `light`. Checked before any probe.
pub const OVERRIDE_ENV: &str = "NUMBER_GAUGE_COLOR_SCHEME";

/// Set by many terminals as `"<fg>;<bg>"` (sometimes `"<fg>;<default>;<bg>"`).
pub const COLORFGBG_ENV: &str = "COLORFGBG";

/// macOS: `defaults read -g AppleInterfaceStyle` prints `Dark` in dark mode
/// and fails (key missing) in light mode.
pub const MACOS_DEFAULTS: &str = "defaults";
pub const MACOS_STYLE_KEY: &str = "AppleInterfaceStyle";

/// GNOME 42+: prints `'prefer-dark'`, `'prefer-light'` or `'default'`.
pub const GSETTINGS: &str = "gsettings";
pub const GNOME_SCHEMA: &str = "org.gnome.desktop.interface";
pub const GNOME_KEY: &str = "color-scheme";

// ============================================================================
// TYPES
// ============================================================================

/// Why a single probe could not answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// Environment variable absent or not unicode.
    EnvMissing { name: &'static str },
    /// Value present but not understood.
    Unrecognized { source: &'static str, value: String },
    /// Helper command could not be spawned.
    CommandUnavailable { program: &'static str, reason: String },
    /// Not applicable on this platform.
    Unsupported,
}

impl std::fmt::Display for ProbeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeError::EnvMissing { name } => write!(f, "{} is not set", name),
            ProbeError::Unrecognized { source, value } => {
                write!(f, "unrecognized {} value: {:?}", source, value)
            }
            ProbeError::CommandUnavailable { program, reason } => {
                write!(f, "could not run {}: {}", program, reason)
            }
            ProbeError::Unsupported => write!(f, "not supported on this platform"),
        }
    }
}

impl std::error::Error for ProbeError {}

/// Capability: "does the user prefer a dark colour scheme right now?"
///
/// Implementations must be cheap enough to call on every poll.
pub trait ColorSchemeSource: Send + Sync {
    fn prefers_dark(&self) -> bool;

    fn scheme(&self) -> ColorScheme {
        ColorScheme::from_prefers_dark(self.prefers_dark())
    }
}

/// Probes the real OS / terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemColorScheme;

impl ColorSchemeSource for SystemColorScheme {
    fn prefers_dark(&self) -> bool {
        detect_color_scheme() == ColorScheme::Dark
    }
}

// ============================================================================
// PURE FUNCTIONS (Parsing)
// ============================================================================

/// Parse the override variable.
pub fn parse_override(value: &str) -> Result<ColorScheme, ProbeError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "dark" => Ok(ColorScheme::Dark),
        "light" => Ok(ColorScheme::Light),
        _ => Err(ProbeError::Unrecognized {
            source: OVERRIDE_ENV,
            value: value.to_string(),
        }),
    }
}

/// Parse `COLORFGBG`. The background is the last field.
///
/// ANSI indices 0-6 and 8 are dark backgrounds; 7 and 9-15 are light.
pub fn parse_colorfgbg(value: &str) -> Result<ColorScheme, ProbeError> {
    let unrecognized = || ProbeError::Unrecognized {
        source: COLORFGBG_ENV,
        value: value.to_string(),
    };
    let bg: u8 = value
        .rsplit(';')
        .next()
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(unrecognized)?;
    match bg {
        0..=6 | 8 => Ok(ColorScheme::Dark),
        7 | 9..=15 => Ok(ColorScheme::Light),
        _ => Err(unrecognized()),
    }
}

/// Parse `defaults read -g AppleInterfaceStyle`.
///
/// A failed read means the key is absent, which is how macOS encodes light mode.
pub fn parse_macos_style(success: bool, stdout: &str) -> ColorScheme {
    if success && stdout.trim().eq_ignore_ascii_case("dark") {
        ColorScheme::Dark
    } else {
        ColorScheme::Light
    }
}

/// Parse `gsettings get org.gnome.desktop.interface color-scheme`.
///
/// `'default'` means no preference was set, so it is not an answer and
/// the next probe decides.
pub fn parse_gnome_color_scheme(stdout: &str) -> Result<ColorScheme, ProbeError> {
    match stdout.trim().trim_matches('\'') {
        "prefer-dark" => Ok(ColorScheme::Dark),
        "prefer-light" => Ok(ColorScheme::Light),
        other => Err(ProbeError::Unrecognized {
            source: GNOME_KEY,
            value: other.to_string(),
        }),
    }
}

// ============================================================================
// EFFECT FUNCTIONS (Probing)
// ============================================================================

/// Detect the current preference, falling back to `Light`.
///
/// Order: override variable, platform setting, `COLORFGBG`.
pub fn detect_color_scheme() -> ColorScheme {
    let probes: [(&str, fn() -> Result<ColorScheme, ProbeError>); 3] = [
        ("override", probe_override),
        ("platform", probe_platform),
        ("colorfgbg", probe_colorfgbg),
    ];

    for (name, probe) in probes {
        match probe() {
            Ok(scheme) => {
                debug!(probe = name, ?scheme, "color scheme detected");
                return scheme;
            }
            Err(e) => debug!(probe = name, error = %e, "color scheme probe skipped"),
        }
    }
    ColorScheme::default()
}

fn read_env(name: &'static str) -> Result<String, ProbeError> {
    std::env::var(name).map_err(|_| ProbeError::EnvMissing { name })
}

fn probe_override() -> Result<ColorScheme, ProbeError> {
    parse_override(&read_env(OVERRIDE_ENV)?)
}

fn probe_colorfgbg() -> Result<ColorScheme, ProbeError> {
    parse_colorfgbg(&read_env(COLORFGBG_ENV)?)
}

#[cfg(target_os = "macos")]
fn probe_platform() -> Result<ColorScheme, ProbeError> {
    let output = Command::new(MACOS_DEFAULTS)
        .args(["read", "-g", MACOS_STYLE_KEY])
        .output()
        .map_err(|e| ProbeError::CommandUnavailable {
            program: MACOS_DEFAULTS,
            reason: e.to_string(),
        })?;
    Ok(parse_macos_style(
        output.status.success(),
        &String::from_utf8_lossy(&output.stdout),
    ))
}

#[cfg(all(unix, not(target_os = "macos")))]
fn probe_platform() -> Result<ColorScheme, ProbeError> {
    let output = Command::new(GSETTINGS)
        .args(["get", GNOME_SCHEMA, GNOME_KEY])
        .output()
        .map_err(|e| ProbeError::CommandUnavailable {
            program: GSETTINGS,
            reason: e.to_string(),
        })?;
    if !output.status.success() {
        return Err(ProbeError::CommandUnavailable {
            program: GSETTINGS,
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    parse_gnome_color_scheme(&String::from_utf8_lossy(&output.stdout))
}

#[cfg(not(unix))]
fn probe_platform() -> Result<ColorScheme, ProbeError> {
    Err(ProbeError::Unsupported)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_accepts_dark_and_light_case_insensitively() {
        assert_eq!(parse_override("dark"), Ok(ColorScheme::Dark));
        assert_eq!(parse_override(" Light\n"), Ok(ColorScheme::Light));
        assert!(parse_override("sepia").is_err());
    }

    #[test]
    fn colorfgbg_uses_last_field_as_background() {
        assert_eq!(parse_colorfgbg("15;0"), Ok(ColorScheme::Dark));
        assert_eq!(parse_colorfgbg("0;15"), Ok(ColorScheme::Light));
        assert_eq!(parse_colorfgbg("0;default;7"), Ok(ColorScheme::Light));
        assert_eq!(parse_colorfgbg("7;8"), Ok(ColorScheme::Dark));
    }

    #[test]
    fn colorfgbg_rejects_garbage() {
        assert!(parse_colorfgbg("").is_err());
        assert!(parse_colorfgbg("15;default").is_err());
        assert!(parse_colorfgbg("15;200").is_err());
    }

    #[test]
    fn macos_missing_key_means_light() {
        assert_eq!(parse_macos_style(true, "Dark\n"), ColorScheme::Dark);
        assert_eq!(parse_macos_style(false, ""), ColorScheme::Light);
        assert_eq!(parse_macos_style(true, "Light\n"), ColorScheme::Light);
    }

    #[test]
    fn gnome_color_scheme_values() {
        assert_eq!(parse_gnome_color_scheme("'prefer-dark'\n"), Ok(ColorScheme::Dark));
        assert_eq!(parse_gnome_color_scheme("'prefer-light'\n"), Ok(ColorScheme::Light));
        assert!(parse_gnome_color_scheme("'neon'").is_err());
    }

    #[test]
    fn gnome_default_defers_to_next_probe() {
        assert_eq!(
            parse_gnome_color_scheme("'default'\n"),
            Err(ProbeError::Unrecognized {
                source: GNOME_KEY,
                value: "default".to_string(),
            })
        );
    }

    #[test]
    fn probe_error_messages_name_the_source() {
        let e = ProbeError::EnvMissing { name: COLORFGBG_ENV };
        assert_eq!(e.to_string(), "COLORFGBG is not set");
        let e = ProbeError::Unrecognized { source: GNOME_KEY, value: "x".into() };
        assert!(e.to_string().contains("color-scheme"));
    }

    #[test]
    fn scheme_default_method_maps_prefers_dark() {
        struct AlwaysDark;
        impl ColorSchemeSource for AlwaysDark {
            fn prefers_dark(&self) -> bool {
                true
            }
        }
        assert_eq!(AlwaysDark.scheme(), ColorScheme::Dark);
    }
}
