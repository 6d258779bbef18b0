//! Text export of designed taps for the accelerator configuration tool.
//!
//! The format is two lines:
//!
//! ```text
//! --- Low Pass Coefficients ---
//! 0.000898512370182117,0.001141116066175535,...
//! ```
//!
//! Every value carries exactly [`COEFFICIENT_PRECISION`] digits after the decimal point.

use std::num::ParseFloatError;

use crate::constants::COEFFICIENT_PRECISION;
use crate::signal_processing::FilterKind;

pub fn header_line(kind: FilterKind) -> String {
    format!("--- {} Coefficients ---", kind)
}

/// Comma-separated taps, no spaces, no trailing separator.
pub fn format_coefficients(taps: &[f64]) -> String {
    taps.iter()
        .map(|t| format!("{:.*}", COEFFICIENT_PRECISION, t))
        .collect::<Vec<_>>()
        .join(",")
}

/// Header line and coefficient line, newline-terminated.
pub fn export_block(kind: FilterKind, taps: &[f64]) -> String {
    format!("{}\n{}\n", header_line(kind), format_coefficients(taps))
}

/// Parse a coefficient line (or a whole export block; the header is skipped).
pub fn parse_coefficients(text: &str) -> Result<Vec<f64>, ParseFloatError> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("---"))
        .flat_map(|line| line.split(','))
        .map(|value| value.trim().parse::<f64>())
        .collect()
}
