//! Amount conversion and output rendering

use super::error::{ExchangeError, Result};

/// Shown in place of a result when the conversion fails.
pub const RESULT_PLACEHOLDER: &str = "???";

/// Shown when the amount entered is not a number.
pub const INVALID_AMOUNT_MESSAGE: &str = "Numeric input only";

pub fn parse_amount(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ExchangeError::InvalidAmount(trimmed.to_string())),
    }
}

/// Converts `amount` expressed in the numerator currency of `rate` into the
/// denominator currency, rounded to three decimals.
pub fn convert(amount: f64, rate: f64, currency: &str) -> Result<f64> {
    let value = amount / rate;
    if rate == 0.0 || !value.is_finite() {
        return Err(ExchangeError::DivisionByZero {
            currency: currency.to_string(),
        });
    }
    Ok(round3(value))
}

pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

pub fn format_result(value: Option<f64>) -> String {
    value.map_or_else(|| RESULT_PLACEHOLDER.to_string(), |v| round3(v).to_string())
}
