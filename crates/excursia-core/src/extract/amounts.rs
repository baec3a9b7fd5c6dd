//! Rouble amount parsing.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::patterns::RUB_DIGITS;

/// Parse the first rouble amount in a price phrase.
///
/// Digit groups may be separated by spaces or non-breaking spaces
/// ("Цена 4 500 руб" gives 4500). Returns `None` when the phrase has no digits.
pub fn parse_rub_amount(s: &str) -> Option<Decimal> {
    let digits: String = RUB_DIGITS
        .find(s)?
        .as_str()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    Decimal::from_str(&digits).ok()
}
