//! Money and period formatting.
//!
//! Everything handed to report export is a localized string produced here.

use serde::{Deserialize, Serialize};

use crate::domain::{coerce_amount, Period};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("CRC")
    }
}

/// Locale-aware number formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl LocaleConfig {
    /// Resolves separators from a BCP 47 tag. Spanish locales group with a
    /// space and use a decimal comma; everything else follows `en-US`.
    pub fn for_tag(tag: &str) -> Self {
        let language_tag = tag.trim().to_string();
        if is_spanish(&language_tag) {
            Self {
                language_tag,
                decimal_separator: ',',
                grouping_separator: ' ',
            }
        } else {
            Self {
                language_tag,
                decimal_separator: '.',
                grouping_separator: ',',
            }
        }
    }

    pub fn is_spanish(&self) -> bool {
        is_spanish(&self.language_tag)
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::for_tag("es-CR")
    }
}

fn is_spanish(tag: &str) -> bool {
    let lower = tag.to_ascii_lowercase();
    lower == "es" || lower.starts_with("es-") || lower.starts_with("es_")
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "CRC" => "₡".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        _ => format!("{code} "),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        _ => 2,
    }
}

/// Renders `value` with fixed precision and the locale's separators.
pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (int_part, fraction) = match body.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (body.as_str(), None),
    };
    let mut out = group_digits(int_part, locale.grouping_separator);
    if let Some(fraction) = fraction {
        out.push(locale.decimal_separator);
        out.push_str(fraction);
    }
    out
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a money amount, e.g. `₡6 000,00` or `-$12.50`.
pub fn format_currency_value(amount: f64, code: &CurrencyCode, locale: &LocaleConfig) -> String {
    let precision = minor_units_for(code.as_str());
    let scale = 10f64.powi(precision as i32);
    let rounded = (coerce_amount(amount) * scale).round() / scale;
    let body = format_number(locale, rounded.abs(), precision);
    let symbol = symbol_for(code.as_str());
    if rounded < 0.0 {
        format!("-{symbol}{body}")
    } else {
        format!("{symbol}{body}")
    }
}

/// Human month label: `octubre de 2026` for Spanish, `October 2026` otherwise.
pub fn month_label(locale: &LocaleConfig, period: Period) -> String {
    let index = period.month().saturating_sub(1) as usize;
    if locale.is_spanish() {
        format!("{} de {}", SPANISH_MONTHS[index], period.year())
    } else {
        format!("{} {}", ENGLISH_MONTHS[index], period.year())
    }
}

const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Bundles a currency and locale so views can format without threading both.
#[derive(Debug, Clone, PartialEq)]
pub struct Formatter {
    pub currency: CurrencyCode,
    pub locale: LocaleConfig,
}

impl Formatter {
    pub fn new(locale_tag: &str, currency: &str) -> Self {
        Self {
            currency: CurrencyCode::new(currency),
            locale: LocaleConfig::for_tag(locale_tag),
        }
    }

    pub fn amount(&self, value: f64) -> String {
        format_currency_value(value, &self.currency, &self.locale)
    }

    pub fn month(&self, period: Period) -> String {
        month_label(&self.locale, period)
    }

    pub fn is_spanish(&self) -> bool {
        self.locale.is_spanish()
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new("es-CR", "CRC")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_colones_with_spanish_separators() {
        let fmt = Formatter::default();
        assert_eq!(fmt.amount(6000.0), "₡6 000,00");
        assert_eq!(fmt.amount(1_234_567.891), "₡1 234 567,89");
        assert_eq!(fmt.amount(0.0), "₡0,00");
        assert_eq!(fmt.amount(-2500.0), "-₡2 500,00");
    }

    #[test]
    fn formats_english_locale_and_other_codes() {
        let fmt = Formatter::new("en-US", "usd");
        assert_eq!(fmt.amount(1234.5), "$1,234.50");
        assert_eq!(fmt.amount(999.0), "$999.00");

        let yen = Formatter::new("en-US", "JPY");
        assert_eq!(yen.amount(1500.4), "¥1,500");

        let other = Formatter::new("en-US", "MXN");
        assert_eq!(other.amount(10.0), "MXN 10.00");
    }

    #[test]
    fn tiny_negatives_do_not_render_a_sign() {
        let fmt = Formatter::default();
        assert_eq!(fmt.amount(-0.001), "₡0,00");
        assert_eq!(fmt.amount(f64::NAN), "₡0,00");
    }

    #[test]
    fn month_labels_follow_locale() {
        let period = Period::parse("2026-10").unwrap();
        assert_eq!(Formatter::default().month(period), "octubre de 2026");
        assert_eq!(Formatter::new("en", "USD").month(period), "October 2026");
    }
}
