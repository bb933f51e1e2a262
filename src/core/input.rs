//! Strict parsing of administrator-typed values. The ledger model itself only
//! coerces; rejecting bad input is the job of this boundary.

use crate::domain::Period;
use crate::errors::LedgerError;

/// Parses a required, non-negative money amount.
pub fn parse_amount(field: &str, raw: &str) -> Result<f64, LedgerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::validation(format!("{field} is required")));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| LedgerError::validation(format!("{field} must be a number")))?;
    if !value.is_finite() {
        return Err(LedgerError::validation(format!("{field} must be a number")));
    }
    if value < 0.0 {
        return Err(LedgerError::validation(format!(
            "{field} cannot be negative"
        )));
    }
    Ok(value)
}

/// Like [`parse_amount`], but blank input means zero.
pub fn parse_optional_amount(field: &str, raw: &str) -> Result<f64, LedgerError> {
    if raw.trim().is_empty() {
        Ok(0.0)
    } else {
        parse_amount(field, raw)
    }
}

/// Parses a `YYYY-MM` period, defaulting to `fallback` when blank.
pub fn parse_period(raw: &str, fallback: Period) -> Result<Period, LedgerError> {
    if raw.trim().is_empty() {
        Ok(fallback)
    } else {
        Period::parse(raw)
    }
}

/// Trims a required text field, rejecting blanks.
pub fn required_text(field: &str, raw: &str) -> Result<String, LedgerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(LedgerError::validation(format!("{field} is required")))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_must_be_numeric_and_non_negative() {
        assert_eq!(parse_amount("amount", " 4000 ").unwrap(), 4000.0);
        assert_eq!(parse_amount("amount", "12.5").unwrap(), 12.5);
        for raw in ["", "  ", "abc", "4,000", "-1", "NaN", "inf"] {
            let err = parse_amount("amount", raw).expect_err(raw);
            assert!(matches!(err, LedgerError::Validation(_)), "{raw}");
        }
    }

    #[test]
    fn optional_amount_treats_blank_as_zero() {
        assert_eq!(parse_optional_amount("initial", "").unwrap(), 0.0);
        assert!(parse_optional_amount("initial", "x").is_err());
    }

    #[test]
    fn blank_period_uses_fallback() {
        let fallback = Period::parse("2026-10").unwrap();
        assert_eq!(parse_period("", fallback).unwrap(), fallback);
        assert_eq!(parse_period("2025-01", fallback).unwrap().key(), "2025-01");
        assert!(parse_period("2025-1", fallback).is_err());
    }

    #[test]
    fn required_text_trims() {
        assert_eq!(required_text("name", "  Ana ").unwrap(), "Ana");
        assert!(required_text("name", "   ").is_err());
    }
}
