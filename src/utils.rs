//! Utility functions for size strings and path shortcuts

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Binary size units as printed by the external tool, smallest first
pub const SIZE_UNITS: [&str; 9] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];

const KILO: f64 = 1024.0;

/// Convert a human-readable size ("9.45MiB") to a byte count
///
/// Accepts a leading `~` (approximate sizes reported for fragmented streams)
/// and surrounding whitespace. The unit is mandatory.
///
/// # Examples
///
/// ```
/// use ydl_job::utils::parse_bytes;
///
/// assert_eq!(parse_bytes("2.00MiB").unwrap(), 2_097_152.0);
/// assert_eq!(parse_bytes("~512B").unwrap(), 512.0);
/// assert!(parse_bytes("12 parsecs").is_err());
/// ```
pub fn parse_bytes(text: &str) -> Result<f64> {
    let unparseable = || Error::UnitParse {
        value: text.to_string(),
    };

    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('~').unwrap_or(trimmed).trim_start();

    // Longest suffix first so "MiB" is not mistaken for "B"
    let (exponent, number) = SIZE_UNITS
        .iter()
        .enumerate()
        .rev()
        .find_map(|(exponent, unit)| trimmed.strip_suffix(unit).map(|rest| (exponent, rest)))
        .ok_or_else(unparseable)?;

    let number = number.trim_end();
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(unparseable());
    }
    let value: f64 = number.parse().map_err(|_| unparseable())?;

    Ok(value * KILO.powi(exponent as i32))
}

/// Render a byte count the way the external tool does ("13.45MiB")
///
/// Uses the largest unit that keeps the value at or above one, with two
/// decimals.
pub fn format_bytes(bytes: f64) -> String {
    let mut value = bytes;
    let mut exponent = 0;
    while value >= KILO && exponent < SIZE_UNITS.len() - 1 {
        value /= KILO;
        exponent += 1;
    }
    format!("{:.2}{}", value, SIZE_UNITS[exponent])
}

/// Replace every `~` path segment with `home`
///
/// Segments that merely contain a tilde ("backup~") are left alone. Without a
/// home directory the path is returned unchanged.
pub fn expand_shortcuts(path: &str, home: Option<&Path>) -> String {
    let Some(home) = home else {
        return path.to_string();
    };
    let home = home.to_string_lossy();

    path.split(['/', std::path::MAIN_SEPARATOR])
        .map(|segment| if segment == "~" { home.as_ref() } else { segment })
        .collect::<Vec<_>>()
        .join(std::path::MAIN_SEPARATOR_STR)
}

/// Home directory of the current user, if the environment names one
pub fn home_dir() -> Option<PathBuf> {
    let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
