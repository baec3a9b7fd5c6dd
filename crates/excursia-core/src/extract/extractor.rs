//! Page-level extractor combining the field extractors.

use tracing::debug;

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::item::ExtractedFields;
use crate::models::page::RawPage;

use super::{
    CostExtractor, DurationExtractor, FieldExtractor, ItemExtractor, PickupExtractor,
    PriceExtractor, Result, SearchBuffers,
};

/// Extractor for excursion pages.
///
/// Price and duration are read from the field buffer, pickup points and
/// additional costs from the wider logistics buffer.
pub struct ExcursionExtractor {
    max_buffer_chars: usize,
    price: PriceExtractor,
    duration: DurationExtractor,
    pickup: PickupExtractor,
    costs: CostExtractor,
}

impl ExcursionExtractor {
    /// Create an extractor from extraction settings.
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            max_buffer_chars: config.max_buffer_chars,
            price: PriceExtractor::new(),
            duration: DurationExtractor::new(),
            pickup: PickupExtractor::new(),
            costs: CostExtractor::from_config(config),
        }
    }
}

impl Default for ExcursionExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl ItemExtractor for ExcursionExtractor {
    fn extract(&self, page: &RawPage) -> Result<ExtractedFields> {
        let buffers = SearchBuffers::from_page(page);

        let len = buffers.char_len();
        if len > self.max_buffer_chars {
            return Err(ExtractionError::BufferTooLarge {
                address: page.address.clone(),
                len,
                limit: self.max_buffer_chars,
            });
        }

        let fields = ExtractedFields {
            price: self.price.extract(&buffers.fields).map(|m| m.value),
            duration: self.duration.extract(&buffers.fields).map(|m| m.value),
            pickup_points: self.pickup.extract_all(&buffers.logistics),
            additional_costs: self.costs.extract_all(&buffers.logistics),
        };

        debug!(
            "Extracted {}: price={:?} duration={:?} pickups={} costs={}",
            page.address,
            fields.price,
            fields.duration,
            fields.pickup_points.len(),
            fields.additional_costs.len()
        );

        Ok(fields)
    }
}

/// Extract fields from a page with the default settings.
pub fn extract(page: &RawPage) -> Result<ExtractedFields> {
    ExcursionExtractor::default().extract(page)
}
