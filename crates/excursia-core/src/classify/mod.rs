//! Scoring-based page classification.
//!
//! A page is scored against three keyword sets and two structural signals,
//! then resolved to exactly one [`Category`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::config::ClassifierConfig;
use crate::models::page::RawPage;
use crate::patterns::{CURRENCY_AMOUNT, DURATION_AMOUNT};

/// Semantic category of a page. Every page gets exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// A purchasable excursion with price and logistics.
    BookableItem,
    /// Guides, transfers, accommodation, event organization.
    ServiceListing,
    /// Contact information page.
    ContactPage,
    /// Anything else.
    Generic,
}

impl Category {
    /// Label used in reports and the CLI.
    pub fn label(&self) -> &'static str {
        match self {
            Category::BookableItem => "excursion",
            Category::ServiceListing => "service",
            Category::ContactPage => "contact",
            Category::Generic => "page",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-page keyword scores and structural signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationScore {
    /// Distinct bookable keywords present, plus structural boosts.
    pub bookable: u32,
    /// Distinct service keywords present.
    pub service: u32,
    /// Distinct contact keywords present.
    pub contact: u32,
    /// The buffer contains a currency amount.
    pub has_price_signal: bool,
    /// The buffer contains a duration amount.
    pub has_duration_signal: bool,
}

impl ClassificationScore {
    /// Resolve the scores to one category by strict priority.
    ///
    /// A tie at the top (e.g. bookable == service, both > 0) falls through to
    /// [`Category::Generic`]: a page is only filed under a category when it
    /// wins outright.
    pub fn category(&self) -> Category {
        if self.bookable > self.service && self.bookable > self.contact && self.bookable > 0 {
            Category::BookableItem
        } else if self.service > self.contact && self.service > 0 {
            Category::ServiceListing
        } else if self.contact > 0 {
            Category::ContactPage
        } else {
            Category::Generic
        }
    }
}

/// Keyword-and-signal page classifier.
#[derive(Debug, Clone, Default)]
pub struct PageClassifier {
    config: ClassifierConfig,
}

impl PageClassifier {
    /// Create a classifier with the given keyword sets and boosts.
    ///
    /// Keywords are folded to lowercase to match the search buffer.
    pub fn new(mut config: ClassifierConfig) -> Self {
        for keywords in [
            &mut config.bookable_keywords,
            &mut config.service_keywords,
            &mut config.contact_keywords,
        ] {
            for keyword in keywords.iter_mut() {
                *keyword = keyword.to_lowercase();
            }
        }
        Self { config }
    }

    /// Score a page without resolving it.
    pub fn score(&self, page: &RawPage) -> ClassificationScore {
        let buffer = search_buffer(page);

        let has_price_signal = CURRENCY_AMOUNT.is_match(&buffer);
        let has_duration_signal = DURATION_AMOUNT.is_match(&buffer);

        let mut bookable = count_keywords(&buffer, &self.config.bookable_keywords);
        if has_price_signal {
            bookable += self.config.price_boost;
        }
        if has_duration_signal {
            bookable += self.config.duration_boost;
        }

        ClassificationScore {
            bookable,
            service: count_keywords(&buffer, &self.config.service_keywords),
            contact: count_keywords(&buffer, &self.config.contact_keywords),
            has_price_signal,
            has_duration_signal,
        }
    }

    /// Classify a page into exactly one category.
    pub fn classify(&self, page: &RawPage) -> Category {
        let score = self.score(page);
        let category = score.category();
        debug!(
            "Classified {} as {} (bookable={}, service={}, contact={})",
            page.address, category, score.bookable, score.service, score.contact
        );
        category
    }
}

/// Classify a page with the default keyword sets.
pub fn classify(page: &RawPage) -> Category {
    PageClassifier::default().classify(page)
}

/// Case-folded address, title, paragraphs and headings, space-separated.
pub fn search_buffer(page: &RawPage) -> String {
    let mut parts: Vec<&str> = vec![&page.address, &page.title];
    parts.extend(page.content.paragraphs.iter().map(String::as_str));
    parts.extend(page.content.headings.iter().map(|h| h.text.as_str()));
    parts.join(" ").to_lowercase()
}

/// Number of distinct keywords present in the buffer.
fn count_keywords(buffer: &str, keywords: &[String]) -> u32 {
    let mut seen: Vec<&str> = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        if !keyword.is_empty() && !seen.contains(&keyword.as_str()) && buffer.contains(keyword.as_str()) {
            seen.push(keyword);
        }
    }
    seen.len() as u32
}
