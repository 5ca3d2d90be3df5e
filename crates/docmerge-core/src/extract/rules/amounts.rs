//! Amount normalization for Chilean-formatted numbers.
//!
//! Dots group thousands and a comma separates decimals (`7.725.844`,
//! `20.586,50`).

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// A monetary cell: a number when the text parses, the text otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Amount {
    /// Parsed amount, serialized as a float.
    Number(#[serde(with = "rust_decimal::serde::float")] Decimal),
    /// Unparseable text or placeholder, passed through unchanged.
    Text(String),
}

impl Amount {
    /// Numeric value as `f64`, if the amount parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Amount::Number(value) => value.to_f64(),
            Amount::Text(_) => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Amount::Number(_))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(value) => f.write_str(&format_amount(*value)),
            Amount::Text(text) => f.write_str(text),
        }
    }
}

/// Parse a dot-thousands, comma-decimal amount.
///
/// All dots are removed and the comma becomes the decimal point. Anything
/// that still fails to parse, placeholders included, comes back unchanged
/// as [`Amount::Text`].
pub fn parse_amount(text: &str) -> Amount {
    let normalized = text.trim().replace('.', "").replace(',', ".");

    match Decimal::from_str(&normalized) {
        Ok(value) => Amount::Number(value),
        Err(_) => Amount::Text(text.to_string()),
    }
}

/// Format an amount back in dot-thousands, comma-decimal style.
pub fn format_amount(amount: Decimal) -> String {
    let amount = amount.normalize();
    let s = if amount.scale() == 0 {
        amount.to_string()
    } else {
        format!("{:.2}", amount)
    };

    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (integer_part, decimal_part) = match digits.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (digits, None),
    };

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::from(sign);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    match decimal_part {
        Some(d) => format!("{},{}", formatted, d),
        None => formatted,
    }
}
