//! Structured field extraction for bookable item pages.
//!
//! Each field family (price, duration, pickup points, additional costs) is an
//! ordered table of pattern families in [`families`], consumed by one
//! evaluator per field. Price and duration stop at the first family that
//! matches; pickup points and additional costs collect every match, deduped
//! by key.

pub mod amounts;
pub mod buffer;
pub mod costs;
pub mod duration;
pub mod families;
pub mod pickup;
pub mod price;

mod extractor;

pub use amounts::parse_rub_amount;
pub use buffer::SearchBuffers;
pub use costs::CostExtractor;
pub use duration::DurationExtractor;
pub use extractor::{ExcursionExtractor, extract};
pub use pickup::PickupExtractor;
pub use price::PriceExtractor;

use crate::error::ExtractionError;
use crate::models::item::ExtractedFields;
use crate::models::page::RawPage;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for page-level extractors.
pub trait ItemExtractor {
    /// Extract every logistics field from a page already classified as bookable.
    fn extract(&self, page: &RawPage) -> Result<ExtractedFields>;
}

/// Trait for single-field extractors working on a search buffer.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched value together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the pattern family that produced it.
    pub family: &'static str,
    /// Byte span in the searched text.
    pub position: Option<(usize, usize)>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, family: &'static str) -> Self {
        Self {
            value,
            family,
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
