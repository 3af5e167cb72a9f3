//! Monetary amount checks
//!
//! Amounts are stored as `NUMERIC` with two fractional digits and at most
//! ten integer digits. Anything the column would round or reject is refused
//! here instead, so a stored amount always reads back unchanged.

use rust_decimal::Decimal;

use crate::error::CoreError;

/// Fractional digits kept by the store
pub const AMOUNT_SCALE: u32 = 2;

/// Largest storable amount, 9 999 999 999.99
pub fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999, AMOUNT_SCALE)
}

/// Rejects negative amounts, more than two decimal places and values above
/// [`max_amount`]
///
/// Trailing zeros do not count towards the scale: `500.000` is accepted.
pub fn validate_amount(field: &str, amount: Decimal) -> Result<(), CoreError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(CoreError::validation(format!("{field} must not be negative")));
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(CoreError::validation(format!(
            "{field} must have at most {AMOUNT_SCALE} decimal places"
        )));
    }
    if amount > max_amount() {
        return Err(CoreError::validation(format!(
            "{field} must not exceed {}",
            max_amount()
        )));
    }
    Ok(())
}
