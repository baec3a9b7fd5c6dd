//! Additional cost extraction.
//!
//! All families contribute, deduped by description (first occurrence wins).
//! Two of the families re-run the tiered patterns on the text following the
//! additional-costs label, where cost blocks often start mid-sentence.

use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::item::AdditionalCost;

use super::FieldExtractor;
use super::families::{COST_FAMILIES, CostFamily, CostGuard, CostScope};

/// Additional cost extractor.
pub struct CostExtractor {
    allow_list: Vec<String>,
    label: String,
    window_chars: usize,
    required_word: String,
}

impl CostExtractor {
    /// Create an extractor with the default allow-list and label.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create an extractor from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            allow_list: config.cost_allow_list.iter().map(|w| w.to_lowercase()).collect(),
            label: config.additional_costs_label.clone(),
            window_chars: config.label_window_chars,
            required_word: config.label_required_word.to_lowercase(),
        }
    }

    /// Text after the last occurrence of the label, if the label is present.
    fn after_label<'a>(&self, text: &'a str) -> Option<&'a str> {
        if self.label.is_empty() {
            return None;
        }
        text.rsplit_once(self.label.as_str()).map(|(_, after)| after)
    }

    fn scope<'a>(&self, text: &'a str, scope: CostScope) -> Option<&'a str> {
        match scope {
            CostScope::Buffer => Some(text),
            CostScope::AfterLabel => self.after_label(text),
            CostScope::AfterLabelWindow => self
                .after_label(text)
                .map(|after| take_chars(after, self.window_chars)),
        }
    }

    fn accepts(&self, guard: CostGuard, description: &str) -> bool {
        let lowered = description.to_lowercase();
        match guard {
            CostGuard::None => true,
            CostGuard::AllowList => self.allow_list.iter().any(|w| lowered.contains(w.as_str())),
            CostGuard::RequiredWord => lowered.contains(self.required_word.as_str()),
        }
    }

    fn collect_family(&self, family: &CostFamily, text: &str, costs: &mut Vec<AdditionalCost>) {
        let Some(haystack) = self.scope(text, family.scope) else {
            return;
        };

        for caps in family.pattern.captures_iter(haystack) {
            let Some(raw) = caps.get(family.description) else {
                continue;
            };
            let description = clean_description(raw.as_str());

            if description.is_empty() || !self.accepts(family.guard, &description) {
                continue;
            }
            if costs.iter().any(|c| c.description == description) {
                debug!("Duplicate cost '{}' from {}", description, family.name);
                continue;
            }

            let price_display = family
                .tiers
                .iter()
                .filter_map(|&idx| caps.get(idx))
                .map(|m| m.as_str().trim())
                .collect::<Vec<_>>()
                .join(" / ");

            debug!("Cost '{}' ({}) matched by {}", description, price_display, family.name);
            costs.push(AdditionalCost {
                price_display,
                description,
                ..AdditionalCost::default()
            });
        }
    }
}

impl Default for CostExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CostExtractor {
    type Output = AdditionalCost;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut costs = Vec::new();
        for family in COST_FAMILIES.iter() {
            self.collect_family(family, text, &mut costs);
        }
        costs
    }
}

/// First `n` characters of `text`, on a char boundary.
fn take_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Trim and undo `\"` / `\n` escapes left over from double-encoded text.
fn clean_description(description: &str) -> String {
    description
        .replace("\\\"", "\"")
        .replace("\\n", " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn costs(text: &str) -> Vec<AdditionalCost> {
        CostExtractor::new().extract_all(text)
    }

    fn cost(price: &str, description: &str) -> AdditionalCost {
        AdditionalCost {
            price_display: price.to_string(),
            description: description.to_string(),
            ..AdditionalCost::default()
        }
    }

    #[test]
    fn test_three_tier_cost() {
        let text = "4000 р. / 3000 р. (с 5 лет до 9 лет вкл.) / 1200 р. (тариф Малыш до 4 лет) – билет в аквапарк";

        assert_eq!(
            costs(text),
            vec![cost("4000 р. / 3000 р. / 1200 р.", "билет в аквапарк")]
        );
    }

    #[test]
    fn test_two_tier_cost() {
        let text = "1500 р. / 900 р. (дети до 12 лет) - канатная дорога";

        assert_eq!(costs(text), vec![cost("1500 р. / 900 р.", "канатная дорога")]);
    }

    #[test]
    fn test_simple_cost_requires_allow_list_word() {
        let text = "800 р. – обед в кафе\n500 р. – сувениры на выбор";

        assert_eq!(costs(text), vec![cost("800 р.", "обед в кафе")]);
    }

    #[test]
    fn test_simple_cost_ignores_unrelated_dash_text() {
        assert!(costs("2024 г. - лучший сезон").is_empty());
    }

    #[test]
    fn test_all_families_contribute() {
        let text = "1500 р. / 900 р. (дети до 12 лет) - канатная дорога\n\
                    700 р. - дегустация вин\n\
                    300 р. - обед";
        let descriptions: Vec<_> = costs(text).into_iter().map(|c| c.description).collect();

        assert_eq!(descriptions, vec!["канатная дорога", "дегустация вин", "обед"]);
    }

    #[test]
    fn test_descriptions_are_unique_first_wins() {
        let text = "1500 р. / 900 р. (дети) - канатная дорога\n600 р. - канатная дорога";
        let found = costs(text);

        assert_eq!(found, vec![cost("1500 р. / 900 р.", "канатная дорога")]);
    }

    #[test]
    fn test_label_pass_recovers_block_swallowed_by_earlier_match() {
        // The first cost's description runs into the label and eats the
        // start of the cost block; only the post-label pass sees it whole.
        let text = "300 р. / 200 р. (дети) / 100 р. (малыши) – экскурсия \
                    Дополнительные расходы 2000 р. / 1000 р. (дети) / 500 р. (до 4 лет) – билет в парк";
        let found = costs(text);

        assert_eq!(found.len(), 2);
        assert_eq!(found[1], cost("2000 р. / 1000 р. / 500 р.", "билет в парк"));
    }

    #[test]
    fn test_label_pass_skipped_without_label() {
        let extractor = CostExtractor::from_config(&ExtractionConfig {
            additional_costs_label: String::new(),
            ..ExtractionConfig::default()
        });

        assert_eq!(extractor.after_label("Дополнительные расходы 100 р."), None);
        assert_eq!(CostExtractor::new().after_label("нет метки"), None);
    }

    #[test]
    fn test_escaped_description_is_cleaned_once() {
        let text = "Дополнительные расходы\n2000 р. / 1000 р. (дети) / 500 р. (малыши) – билет \\\"Аква\\\" на весь день";
        let found = costs(text);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description, "билет \"Аква\" на весь день");
    }

    #[test]
    fn test_take_chars_respects_boundaries() {
        assert_eq!(take_chars("абвгд", 2), "аб");
        assert_eq!(take_chars("аб", 10), "аб");
    }

    #[test]
    fn test_no_costs() {
        assert!(costs("").is_empty());
        assert!(costs("Цена 4000 руб").is_empty());
    }
}
