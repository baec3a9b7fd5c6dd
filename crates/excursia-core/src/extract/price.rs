//! Price extraction: first matching family wins, matched text kept verbatim.

use tracing::debug;

use super::families::{PRICE_FAMILIES, match_families};
use super::{ExtractionMatch, FieldExtractor};

/// Price field extractor.
pub struct PriceExtractor;

impl PriceExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PriceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PriceExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let found = match_families(&PRICE_FAMILIES, text).next();
        if let Some(m) = &found {
            debug!("Price '{}' matched by {}", m.value, m.family);
        }
        found
    }

    /// One match per family that matches, in priority order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        match_families(&PRICE_FAMILIES, text).collect()
    }
}
