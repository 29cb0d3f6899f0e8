//! Price normalization.
//!
//! Prices travel as decimal-valued strings and are stored with exactly two
//! fractional digits. Excess digits are truncated, never rounded: a dish
//! priced `"12.555"` is stored as `"12.55"`.

use rust_decimal::Decimal;

use crate::domain::error::DomainError;

const PRICE_SCALE: u32 = 2;

/// Parse a price string and normalize it to exactly two fractional digits.
///
/// Truncates toward zero when more than two fractional digits are supplied.
pub fn normalize_price(raw: &str) -> Result<String, DomainError> {
    let parsed: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| DomainError::validation(format!("price `{raw}` is not a decimal number")))?;

    if parsed.is_sign_negative() {
        return Err(DomainError::validation(format!(
            "price `{raw}` must not be negative"
        )));
    }

    let mut normalized = parsed.trunc_with_scale(PRICE_SCALE);
    normalized.rescale(PRICE_SCALE);
    Ok(normalized.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_excess_fractional_digits() {
        assert_eq!(normalize_price("12.555").unwrap(), "12.55");
        assert_eq!(normalize_price("12.559").unwrap(), "12.55");
    }

    #[test]
    fn pads_to_two_fractional_digits() {
        assert_eq!(normalize_price("7").unwrap(), "7.00");
        assert_eq!(normalize_price("7.5").unwrap(), "7.50");
    }

    #[test]
    fn keeps_exact_two_digit_prices() {
        assert_eq!(normalize_price("182.99").unwrap(), "182.99");
        assert_eq!(normalize_price("0.01").unwrap(), "0.01");
    }

    #[test]
    fn rejects_garbage_and_negative_input() {
        assert!(normalize_price("free").is_err());
        assert!(normalize_price("").is_err());
        assert!(normalize_price("-4.20").is_err());
    }
}
