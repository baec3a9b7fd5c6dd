//! Core library for excursion site corpus processing.
//!
//! This crate provides:
//! - Keyword-and-signal page classification
//! - Price, duration, pickup point and additional cost extraction
//! - Corpus aggregation and reclassification
//! - Catalog export with content cleanup and statistics

pub mod aggregate;
pub mod catalog;
pub mod classify;
pub mod error;
pub mod extract;
pub mod models;
pub mod patterns;

pub use aggregate::{Aggregator, IngestReport, Reclassified, SkippedPage, reclassify, reclassify_with_progress};
pub use catalog::{Catalog, CatalogEntry, CatalogStats, CorpusStats, build_catalog, excursion_urls};
pub use classify::{Category, ClassificationScore, PageClassifier, classify};
pub use error::{CorpusError, ExcursiaError, ExtractionError, Result};
pub use extract::{ExcursionExtractor, FieldExtractor, ItemExtractor, extract};
pub use models::{
    AdditionalCost, BookableItem, ContactMap, Corpus, ExcursiaConfig, ExtractedFields, PickupPoint, RawPage,
};
