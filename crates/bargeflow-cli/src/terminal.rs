//! Terminal styling and number formatting for text output.

/// ANSI escape codes used by the text renderers.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bold white, used for section headings.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    pub const GRAY: &str = "\x1b[90m";
    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
}

/// Escape codes for one rendering pass; empty strings when color is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub heading: &'static str,
    pub muted: &'static str,
    pub good: &'static str,
    pub bad: &'static str,
}

impl ColorPalette {
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            heading: colors::WHITE_BOLD,
            muted: colors::GRAY,
            good: colors::GREEN,
            bad: colors::RED,
        }
    }

    pub const fn plain() -> Self {
        Self {
            reset: "",
            heading: "",
            muted: "",
            good: "",
            bad: "",
        }
    }

    /// Colored palette when the terminal supports it.
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

/// Whether color output should be used.
///
/// Respects the `NO_COLOR` environment variable (https://no-color.org/) and
/// the `TERM=dumb` convention.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Format a number with thousand separators (commas).
///
/// # Examples
///
/// ```
/// # use bargeflow_cli::terminal::format_with_separators;
/// assert_eq!(format_with_separators(999), "999");
/// assert_eq!(format_with_separators(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_with_separators(n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Round an amount to whole units and add separators; `n/a` when not finite.
#[must_use]
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let rounded = value.abs().round();
    let sign = if value < 0.0 && rounded > 0.0 { "-" } else { "" };
    format!("{sign}{}", format_with_separators(rounded as u64))
}

/// Two-decimal cost per tonne, or `n/a` when nothing was carried.
#[must_use]
pub fn format_unit_cost(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}")
    } else {
        "n/a".to_string()
    }
}
