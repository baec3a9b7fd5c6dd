//! Corpus and catalog statistics.

use serde::Serialize;

use crate::models::corpus::Corpus;

use super::Catalog;

/// Collection sizes of a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    pub pages: usize,
    pub excursions: usize,
    pub services: usize,
    pub images: usize,
    pub contact_fields: usize,
    /// Items with at least one logistics field.
    pub excursions_with_logistics: usize,
}

impl CorpusStats {
    pub fn from_corpus(corpus: &Corpus) -> Self {
        Self {
            pages: corpus.pages.len(),
            excursions: corpus.excursions.len(),
            services: corpus.services.len(),
            images: corpus.images.len(),
            contact_fields: corpus.contacts.len(),
            excursions_with_logistics: corpus.excursions.iter().filter(|e| e.has_logistics()).count(),
        }
    }
}

/// Field coverage of an exported catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub with_price: usize,
    pub with_duration: usize,
    pub with_pickup_points: usize,
    pub with_additional_costs: usize,
    pub total_images: usize,
}

impl CatalogStats {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let entries = &catalog.excursions;
        Self {
            total: entries.len(),
            with_price: entries.iter().filter(|e| e.price.is_some()).count(),
            with_duration: entries.iter().filter(|e| e.duration.is_some()).count(),
            with_pickup_points: entries.iter().filter(|e| e.pickup_points.is_some()).count(),
            with_additional_costs: entries.iter().filter(|e| e.additional_costs.is_some()).count(),
            total_images: entries.iter().map(|e| e.image_count).sum(),
        }
    }
}
