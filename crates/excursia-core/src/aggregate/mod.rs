//! Corpus aggregation.
//!
//! The [`Aggregator`] owns the only cross-page state of a run: the collections
//! being built and the merged contact map. It starts empty and is consumed by
//! [`Aggregator::finish`].

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classify::{Category, PageClassifier};
use crate::extract::{ExcursionExtractor, ItemExtractor};
use crate::models::config::ExcursiaConfig;
use crate::models::corpus::{ContactMap, Corpus};
use crate::models::item::{BookableItem, ExtractedFields};
use crate::models::page::RawPage;

/// A page dropped because extraction failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPage {
    pub address: String,
    pub reason: String,
}

/// What an aggregation run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Pages routed to the bookable item collection.
    pub bookable: usize,
    /// Pages routed to the service collection.
    pub services: usize,
    /// Contact pages (also stored as generic pages).
    pub contacts: usize,
    /// Generic pages.
    pub generic: usize,
    /// Pages that produced no record.
    pub skipped: Vec<SkippedPage>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl IngestReport {
    /// Number of pages that produced a record.
    pub fn processed(&self) -> usize {
        self.bookable + self.services + self.contacts + self.generic
    }

    fn count(&mut self, category: Category) {
        match category {
            Category::BookableItem => self.bookable += 1,
            Category::ServiceListing => self.services += 1,
            Category::ContactPage => self.contacts += 1,
            Category::Generic => self.generic += 1,
        }
    }
}

/// Routes classified pages into category-indexed collections.
pub struct Aggregator {
    classifier: PageClassifier,
    extractor: ExcursionExtractor,
    corpus: Corpus,
    report: IngestReport,
    started: Instant,
}

impl Aggregator {
    /// Create an aggregator with empty collections and contact map.
    pub fn new(config: &ExcursiaConfig) -> Self {
        Self {
            classifier: PageClassifier::new(config.classifier.clone()),
            extractor: ExcursionExtractor::new(&config.extraction),
            corpus: Corpus::default(),
            report: IngestReport::default(),
            started: Instant::now(),
        }
    }

    /// Classify a page, extract fields if it is bookable, and ingest it.
    ///
    /// Returns `None` when extraction failed and the page was skipped.
    pub fn process(&mut self, page: RawPage) -> Option<Category> {
        let category = self.classifier.classify(&page);

        let fields = if category == Category::BookableItem {
            match self.extractor.extract(&page) {
                Ok(fields) => Some(fields),
                Err(e) => {
                    warn!("Skipping {}: {}", page.address, e);
                    self.report.skipped.push(SkippedPage {
                        address: page.address,
                        reason: e.to_string(),
                    });
                    return None;
                }
            }
        } else {
            None
        };

        self.ingest(page, category, fields);
        Some(category)
    }

    /// Route an already classified page into its collection.
    ///
    /// A bookable page without extracted fields becomes an item with every
    /// logistics field absent. A contact page is merged into the contact map
    /// (last value wins per key) and also stored as a generic page.
    pub fn ingest(&mut self, page: RawPage, category: Category, fields: Option<ExtractedFields>) {
        debug!("Ingesting {} as {}", page.address, category);
        self.report.count(category);

        match category {
            Category::BookableItem => {
                let item = BookableItem::from_page(page, fields.unwrap_or_default());
                self.corpus.excursions.push(item);
            }
            Category::ServiceListing => self.corpus.services.push(page),
            Category::ContactPage => {
                if let Some(contacts) = &page.contacts {
                    merge_contacts(&mut self.corpus.contacts, contacts);
                }
                self.corpus.pages.push(page);
            }
            Category::Generic => self.corpus.pages.push(page),
        }
    }

    /// Merged contact fields so far.
    pub fn contacts(&self) -> &ContactMap {
        &self.corpus.contacts
    }

    /// Finalize the run.
    pub fn finish(mut self) -> (Corpus, IngestReport) {
        self.report.processing_time_ms = self.started.elapsed().as_millis() as u64;
        (self.corpus, self.report)
    }
}

/// Merge `source` into `target`; existing keys are overwritten.
pub fn merge_contacts(target: &mut ContactMap, source: &ContactMap) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}

/// Output of a reclassification run.
#[derive(Debug, Clone)]
pub struct Reclassified {
    pub corpus: Corpus,
    pub report: IngestReport,
}

/// Rebuild a corpus by re-running classification and extraction over its
/// `pages` collection.
pub fn reclassify(corpus: Corpus, config: &ExcursiaConfig) -> Reclassified {
    reclassify_with_progress(corpus, config, |_, _| {})
}

/// [`reclassify`] with a callback receiving `(done, total)` after each page.
///
/// Collections are rebuilt from scratch in input order. Existing bookable
/// items and services were never subject to reclassification and are
/// appended verbatim after the new records; existing contact fields are
/// merged after the recomputed ones. Images, navigation and metadata pass
/// through untouched.
pub fn reclassify_with_progress<F>(corpus: Corpus, config: &ExcursiaConfig, mut progress: F) -> Reclassified
where
    F: FnMut(usize, usize),
{
    let Corpus {
        pages,
        excursions,
        services,
        contacts,
        navigation,
        images,
        metadata,
    } = corpus;

    let total = pages.len();
    info!("Reclassifying {} pages", total);

    let mut aggregator = Aggregator::new(config);
    for (idx, page) in pages.into_iter().enumerate() {
        aggregator.process(page);
        progress(idx + 1, total);
    }
    let (mut rebuilt, report) = aggregator.finish();

    debug!(
        "Carrying over {} items and {} services",
        excursions.len(),
        services.len()
    );
    rebuilt.excursions.extend(excursions);
    rebuilt.services.extend(services);
    merge_contacts(&mut rebuilt.contacts, &contacts);
    rebuilt.navigation = navigation;
    rebuilt.images = images;
    rebuilt.metadata = metadata;

    info!(
        "Reclassified {} pages: {} bookable, {} services, {} contact, {} generic, {} skipped in {}ms",
        total,
        report.bookable,
        report.services,
        report.contacts,
        report.generic,
        report.skipped.len(),
        report.processing_time_ms
    );

    Reclassified {
        corpus: rebuilt,
        report,
    }
}
