//! Regex patterns for Russian-language excursion pages.
//!
//! Amounts are kept as matched text; nothing here parses numbers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Classification signals (matched against the case-folded buffer)
    pub static ref CURRENCY_AMOUNT: Regex = Regex::new(
        r"(?i)\d+\s*(?:руб|₽|рублей)"
    ).unwrap();

    pub static ref DURATION_AMOUNT: Regex = Regex::new(
        r"(?i)\d+\s*(?:час|часа|часов|день|дня|дней)"
    ).unwrap();

    // Price: "Цена 4000 руб", "... 4000 руб" at end of a text unit, "от 1500 ₽"
    pub static ref PRICE_LABELED: Regex = Regex::new(
        r"(?i)Цена\s+(\d+[\s\d]*)\s*(руб|₽)"
    ).unwrap();

    pub static ref PRICE_TRAILING: Regex = Regex::new(
        r"(?im)(\d+)\s*руб\s*$"
    ).unwrap();

    pub static ref PRICE_FROM: Regex = Regex::new(
        r"(?i)\bот\s+(\d+)\s*(руб|₽)"
    ).unwrap();

    // Duration: "Продолжительность: 8 часов", "... 3 часа" at end of a text unit, "6ч"
    pub static ref DURATION_LABELED: Regex = Regex::new(
        r"(?i)Продолжительность[:\s]+(\d+[\s\-]?(часов|часа|час|ч|дней|дня|день))"
    ).unwrap();

    pub static ref DURATION_TRAILING: Regex = Regex::new(
        r"(?im)(\d+)\s*(часов|часа|час|ч)\s*$"
    ).unwrap();

    pub static ref DURATION_SHORT: Regex = Regex::new(
        r"(?i)(\d+)\s*ч\b"
    ).unwrap();

    // Pickup points: "Отправление из Сочи - 3000р.взр./ 2500р.дет.(7-14)"
    pub static ref PICKUP_DUAL_PRICE: Regex = Regex::new(
        r"(?i)Отправление\s+из\s+([А-Яа-яЁё]+)\s*[-–]\s*(\d+)р\.взр\./\s*(\d+)р\.дет\.\(([^)]+)\)"
    ).unwrap();

    pub static ref PICKUP_SINGLE_PRICE: Regex = Regex::new(
        r"(?i)Отправление\s+из\s+([А-Яа-яЁё]+)\s*[-–]\s*(\d+)\s*[р.]"
    ).unwrap();

    pub static ref PICKUP_LOOSE: Regex = Regex::new(
        r"(?i)\bиз\s+([А-Яа-яЁё]+)\s*[-–]\s*(\d+)\s*[р.]"
    ).unwrap();

    // Additional costs:
    // "4000 р. / 3000 р. (с 5 лет) / 1200 р. (тариф «Малыш») – билет в аквапарк"
    pub static ref COST_THREE_TIER: Regex = Regex::new(
        r"(?i)(\d+\s*[р.]+)\s*[/–]\s*(\d+\s*[р.]+)?\s*\([^)]+\)\s*[/–]?\s*(\d+\s*[р.]+)?\s*\([^)]+\)\s*[-–]\s*([^.\n]+)"
    ).unwrap();

    // "4000 р. / 3000 р. (с 5 лет до 9 лет вкл.) – билет"
    pub static ref COST_TWO_TIER: Regex = Regex::new(
        r"(?i)(\d+\s*[р.]+)\s*[/–]\s*(\d+\s*[р.]+)?\s*\([^)]+\)\s*[-–]\s*([^.\n]+)"
    ).unwrap();

    // Every tier present; used only right after the additional-costs label.
    pub static ref COST_LINE_STRICT: Regex = Regex::new(
        r"(?i)(\d+\s*[р.]+)\s*[/–]\s*(\d+\s*[р.]+)\s*\([^)]+\)\s*[/–]\s*(\d+\s*[р.]+)\s*\([^)]+\)\s*[-–]\s*([^.\n]+)"
    ).unwrap();

    // "800 р. – обед"
    pub static ref COST_SIMPLE: Regex = Regex::new(
        r"(?i)(\d+\s*[р.]+)\s*[-–]\s*([^.\n]+)"
    ).unwrap();

    // Rouble amount inside a price phrase, digits possibly grouped by spaces
    pub static ref RUB_DIGITS: Regex = Regex::new(
        r"\d[\d\s\u{00a0}]*"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_patterns() {
        assert!(CURRENCY_AMOUNT.is_match("цена 4000 руб"));
        assert!(CURRENCY_AMOUNT.is_match("1500₽"));
        assert!(!CURRENCY_AMOUNT.is_match("4000 долларов"));
        assert!(DURATION_AMOUNT.is_match("8 часов"));
        assert!(DURATION_AMOUNT.is_match("2 дня"));
        assert!(!DURATION_AMOUNT.is_match("много часов"));
    }

    #[test]
    fn test_duration_label_prefers_full_unit() {
        let m = DURATION_LABELED.find("Продолжительность: 3 часа").unwrap();
        assert_eq!(m.as_str(), "Продолжительность: 3 часа");
    }

    #[test]
    fn test_short_duration_needs_word_boundary() {
        assert!(DURATION_SHORT.is_match("в пути 6ч, обед"));
        assert!(!DURATION_SHORT.is_match("6 часов"));
    }

    #[test]
    fn test_price_from_requires_word_start() {
        assert!(PRICE_FROM.is_match("от 1500 руб"));
        assert!(!PRICE_FROM.is_match("работ 1500 руб"));
    }
}
