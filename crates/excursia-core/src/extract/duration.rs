//! Duration extraction: first matching family wins, matched text kept verbatim.

use tracing::debug;

use super::families::{DURATION_FAMILIES, match_families};
use super::{ExtractionMatch, FieldExtractor};

/// Duration field extractor.
pub struct DurationExtractor;

impl DurationExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DurationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DurationExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let found = match_families(&DURATION_FAMILIES, text).next();
        if let Some(m) = &found {
            debug!("Duration '{}' matched by {}", m.value, m.family);
        }
        found
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        match_families(&DURATION_FAMILIES, text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn duration(text: &str) -> Option<String> {
        DurationExtractor::new().extract(text).map(|m| m.value)
    }

    #[test]
    fn test_labeled_duration() {
        assert_eq!(
            duration("Продолжительность: 8 часов"),
            Some("Продолжительность: 8 часов".to_string())
        );
        assert_eq!(
            duration("Продолжительность 2 дня"),
            Some("Продолжительность 2 дня".to_string())
        );
        assert_eq!(
            duration("Продолжительность: 5ч"),
            Some("Продолжительность: 5ч".to_string())
        );
    }

    #[test]
    fn test_trailing_duration() {
        assert_eq!(duration("Время в пути 3 часа\nВыезд утром"), Some("3 часа".to_string()));
    }

    #[test]
    fn test_short_duration_anywhere() {
        assert_eq!(duration("Выезд в 8:00, 6ч в пути, возвращение вечером"), Some("6ч".to_string()));
    }

    #[test]
    fn test_labeled_beats_earlier_short_form() {
        let text = "Обед 1ч, далее прогулка\nПродолжительность: 10 часов";
        let found = DurationExtractor::new().extract(text).unwrap();

        assert_eq!(found.value, "Продолжительность: 10 часов");
        assert_eq!(found.family, "duration_labeled");
    }

    #[test]
    fn test_no_duration() {
        assert_eq!(duration("Цена 4000 руб"), None);
    }
}
