//! Price token validation and formatting
//!
//! Prices on the storefront use `.` for thousands and `,` for decimals
//! (`1.234.567,89`).

/// Acceptance rules for [`normalize_price`].
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRules {
    /// Smallest accepted value; anything below is treated as a misread id or rating.
    pub min_value: f64,
    /// Currency code appended after the number.
    pub currency: String,
}

impl Default for PriceRules {
    fn default() -> Self {
        Self {
            min_value: 1000.0,
            currency: "COP".to_string(),
        }
    }
}

/// Keep only digits and separators.
pub fn clean_price_token(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect()
}

/// Numeric value of a price token, reading `.` as a thousands separator and
/// `,` as the decimal point.
pub fn parse_price_value(raw: &str) -> Option<f64> {
    let cleaned = clean_price_token(raw);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.replace('.', "").replace(',', ".").parse().ok()
}

/// Validate a raw price token and format it as `$<token> <currency>`.
///
/// Returns `None` when the token has no digits, does not parse, or falls
/// below `rules.min_value`.
pub fn normalize_price(raw: &str, rules: &PriceRules) -> Option<String> {
    let cleaned = clean_price_token(raw);
    let value = parse_price_value(&cleaned)?;
    if value < rules.min_value {
        return None;
    }
    Some(format_price(&cleaned, &rules.currency))
}

pub fn format_price(amount: &str, currency: &str) -> String {
    format!("${amount} {currency}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_separators() {
        assert_eq!(parse_price_value("1.234,56"), Some(1234.56));
        assert_eq!(parse_price_value("$ 1.899.000"), Some(1_899_000.0));
        assert_eq!(parse_price_value("abc"), None);
        assert_eq!(parse_price_value("1,2,3"), None);
    }

    #[test]
    fn test_threshold() {
        let rules = PriceRules::default();
        assert_eq!(
            normalize_price("1.234,56", &rules),
            Some("$1.234,56 COP".to_string())
        );
        assert_eq!(normalize_price("12,34", &rules), None);
        assert_eq!(normalize_price("999", &rules), None);
        assert_eq!(normalize_price("1.000", &rules), Some("$1.000 COP".to_string()));
    }

    #[test]
    fn test_strips_symbols() {
        let rules = PriceRules {
            min_value: 1000.0,
            currency: "USD".to_string(),
        };
        assert_eq!(
            normalize_price(" $ 2.499.000 ", &rules),
            Some("$2.499.000 USD".to_string())
        );
        assert_eq!(normalize_price("", &rules), None);
        assert_eq!(normalize_price("$", &rules), None);
    }
}
