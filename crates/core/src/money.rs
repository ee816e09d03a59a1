//! Monetary amounts (prices, booking amounts, deposits).

use rust_decimal::Decimal;

use crate::error::CoreError;

/// NUMERIC(10,2) in the database.
pub type Money = Decimal;

/// Digits allowed before the decimal point by NUMERIC(10,2).
pub const MAX_INTEGER_DIGITS: u32 = 8;

/// Digits allowed after the decimal point by NUMERIC(10,2).
pub const MAX_SCALE: u32 = 2;

/// Reject negative amounts, naming the offending field.
pub fn ensure_non_negative(field: &str, value: Money) -> Result<Money, CoreError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CoreError::Validation(format!(
            "{field} must be greater than or equal to 0"
        )));
    }
    Ok(value)
}

/// Reject values the NUMERIC(10,2) columns cannot hold exactly.
///
/// Trailing zeros do not count towards the scale, so `"10.500"` is accepted.
pub fn ensure_fits_column(field: &str, value: Money) -> Result<Money, CoreError> {
    if value.normalize().scale() > MAX_SCALE {
        return Err(CoreError::Validation(format!(
            "{field} must have at most {MAX_SCALE} decimal places"
        )));
    }
    if value.abs().trunc() >= Decimal::from(10_i64.pow(MAX_INTEGER_DIGITS)) {
        return Err(CoreError::Validation(format!(
            "{field} must have at most {MAX_INTEGER_DIGITS} digits before the decimal point"
        )));
    }
    Ok(value)
}

/// Non-negative and storable.
pub fn validate_amount(field: &str, value: Money) -> Result<Money, CoreError> {
    ensure_fits_column(field, ensure_non_negative(field, value)?)
}

/// Serde helper for optional amounts where a blank string means "not given".
///
/// Accepts a JSON number, a numeric string, `""`, `null` or a missing field.
/// Use with `#[serde(default, deserialize_with = "blank_as_none::deserialize")]`.
pub mod blank_as_none {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(Decimal),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(n)) => Ok(Some(n)),
            Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(Raw::Text(s)) => s
                .trim()
                .parse::<Decimal>()
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }

    /// Patch variant: a missing field stays `None`, while `null` or `""`
    /// becomes `Some(None)` and clears the column.
    pub fn deserialize_patch<'de, D>(deserializer: D) -> Result<Option<Option<Decimal>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize(deserializer).map(Some)
    }
}
