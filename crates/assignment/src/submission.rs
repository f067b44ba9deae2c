//! Normalisation of a submitted assignment form.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;

use mpassign_core::{AssignmentId, ProductId};

/// Raw submitted form fields, keyed by field name.
pub type FieldMap = BTreeMap<String, String>;

pub const PRODUCT_ID: &str = "product_id";
pub const ASSIGN_ID: &str = "assign_id";
pub const CONDITION: &str = "product_condition";
pub const QUANTITY: &str = "quantity_and_stock_status";
pub const PRICE: &str = "price";
pub const DESCRIPTION: &str = "description";
pub const IMAGE: &str = "image";
pub const DELETE_IMAGE: &str = "del";

/// A normalised assignment submission.
///
/// `fields` keeps the full raw form; dynamic attribute values are read from
/// it by attribute code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub product_id: ProductId,
    pub assign_id: AssignmentId,
    pub condition: i64,
    /// Clamped to zero.
    pub qty: u64,
    /// Clamped to zero.
    pub price: Decimal,
    pub description: String,
    pub image: String,
    pub delete_image: bool,
    pub fields: FieldMap,
}

impl Submission {
    pub fn from_fields(fields: FieldMap) -> Self {
        let field = |name: &str| fields.get(name).map(String::as_str).unwrap_or("");

        let qty = parse_int_lenient(field(QUANTITY)).max(0) as u64;
        let price = parse_decimal_lenient(field(PRICE)).max(Decimal::ZERO);

        Self {
            product_id: ProductId::new(parse_id_lenient(field(PRODUCT_ID))),
            assign_id: AssignmentId::new(parse_id_lenient(field(ASSIGN_ID))),
            condition: parse_int_lenient(field(CONDITION)),
            qty,
            price,
            description: field(DESCRIPTION).to_string(),
            image: field(IMAGE).to_string(),
            delete_image: parse_int_lenient(field(DELETE_IMAGE)) == 1,
            fields,
        }
    }

    /// Submitted value of a dynamic attribute, if the form carried it.
    pub fn attribute_value(&self, code: &str) -> Option<&str> {
        self.fields.get(code).map(String::as_str)
    }
}

/// Integer prefix of `raw`: optional sign and leading digits, surrounding
/// whitespace ignored. Anything unparsable is zero.
pub fn parse_int_lenient(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }
    if negative { -value } else { value }
}

/// Non-negative id from a form field; negative input is treated as unset.
pub fn parse_id_lenient(raw: &str) -> u64 {
    parse_int_lenient(raw).max(0) as u64
}

/// Decimal prefix of `raw` (`[sign]digits[.digits]`); unparsable is zero.
pub fn parse_decimal_lenient(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (idx, ch) in trimmed.char_indices() {
        match ch {
            '-' | '+' if idx == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = idx + ch.len_utf8();
    }
    if !seen_digit {
        return Decimal::ZERO;
    }
    Decimal::from_str(trimmed[..end].trim_end_matches('.')).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_integers_like_the_host_form_layer() {
        assert_eq!(parse_int_lenient("-5"), -5);
        assert_eq!(parse_int_lenient(" 12abc"), 12);
        assert_eq!(parse_int_lenient("1.9"), 1);
        assert_eq!(parse_int_lenient("abc"), 0);
        assert_eq!(parse_int_lenient(""), 0);
        assert_eq!(parse_int_lenient("+7"), 7);
    }

    #[test]
    fn parses_decimal_prefixes() {
        assert_eq!(parse_decimal_lenient("19.99"), Decimal::new(1999, 2));
        assert_eq!(parse_decimal_lenient("5.50 USD"), Decimal::new(550, 2));
        assert_eq!(parse_decimal_lenient("7."), Decimal::new(7, 0));
        assert_eq!(parse_decimal_lenient("free"), Decimal::ZERO);
        assert_eq!(parse_decimal_lenient("-"), Decimal::ZERO);
    }

    #[test]
    fn normalises_submission_fields() {
        let submission = Submission::from_fields(form(&[
            ("product_id", "10"),
            ("product_condition", "1"),
            ("quantity_and_stock_status", "-5"),
            ("price", "19.99"),
            ("description", "x"),
            ("image", ""),
            ("del", "0"),
            ("color", "12"),
        ]));

        assert_eq!(submission.product_id, ProductId::new(10));
        assert!(submission.assign_id.is_zero());
        assert_eq!(submission.condition, 1);
        assert_eq!(submission.qty, 0);
        assert_eq!(submission.price, Decimal::new(1999, 2));
        assert!(!submission.delete_image);
        assert_eq!(submission.attribute_value("color"), Some("12"));
        assert_eq!(submission.attribute_value("size"), None);
    }

    #[test]
    fn negative_price_clamps_to_zero() {
        let submission = Submission::from_fields(form(&[("price", "-3.5"), ("del", "1")]));
        assert_eq!(submission.price, Decimal::ZERO);
        assert!(submission.delete_image);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: persisted quantity is max(0, input).
            #[test]
            fn quantity_is_clamped_at_zero(qty in -1_000_000i64..1_000_000i64) {
                let raw = qty.to_string();
                let submission = Submission::from_fields(form(&[
                    ("quantity_and_stock_status", raw.as_str()),
                ]));
                prop_assert_eq!(submission.qty, qty.max(0) as u64);
            }
        }
    }
}
