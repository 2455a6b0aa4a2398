//! Price input parsing and display formatting.
//!
//! Prices are plain numbers on the wire (no currency field); the catalog
//! displays them in Pakistani rupees.

use crate::CatalogError;

/// Currency label prefixed to displayed prices.
pub const CURRENCY_LABEL: &str = "PKR";

/// Fraction digits kept when displaying a price.
const MAX_FRACTION_DIGITS: usize = 3;

/// Parse a price filter typed by the user.
///
/// Empty or whitespace-only input means "no bound" and yields `None`.
pub fn parse_price_input(input: &str) -> Result<Option<f64>, CatalogError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(CatalogError::InvalidPrice(trimmed.to_string())),
    }
}

/// Format a price for display, e.g. `PKR 1,234.5`.
pub fn format_price(value: f64) -> String {
    format!("{} {}", CURRENCY_LABEL, format_amount(value))
}

/// Group thousands and keep at most three fraction digits, trailing zeros trimmed.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && (grouped != "0" || !frac_part.is_empty());
    let sign = if negative { "-" } else { "" };

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}
