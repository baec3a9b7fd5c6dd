//! Catalog export: cleaned excursion records ready for publishing.

mod stats;

pub use stats::{CatalogStats, CorpusStats};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::extract::parse_rub_amount;
use crate::models::config::CatalogConfig;
use crate::models::corpus::Corpus;
use crate::models::item::{AdditionalCost, BookableItem, PickupPoint};
use crate::models::page::{Heading, ImageRef, Link};

/// Exported catalog document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub total: usize,
    pub excursions: Vec<CatalogEntry>,
}

/// One exported excursion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub url: String,
    pub title: String,
    pub description: String,
    pub price: Option<String>,
    pub duration: Option<String>,
    pub pickup_points: Option<Vec<PickupPoint>>,
    pub additional_costs: Option<Vec<AdditionalCost>>,
    pub images: Vec<CatalogImage>,
    pub image_count: usize,
    pub content: CatalogContent,
    pub links: Vec<Link>,
    /// Region label.
    pub category: String,
    /// Price in roubles, when the price phrase has digits.
    pub price_rub: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogImage {
    pub url: String,
    pub alt: String,
    pub is_main: bool,
}

/// Content groups with site chrome removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogContent {
    pub headings: Vec<Heading>,
    pub paragraphs: Vec<String>,
    pub lists: Vec<Vec<String>>,
}

/// Build the catalog from the corpus's bookable items.
pub fn build_catalog(corpus: &Corpus, config: &CatalogConfig) -> Catalog {
    let excursions: Vec<CatalogEntry> = corpus
        .excursions
        .iter()
        .filter(|item| is_detail_page(&item.address, config))
        .map(|item| build_entry(item, config))
        .collect();

    info!(
        "Catalog: {} of {} items exported",
        excursions.len(),
        corpus.excursions.len()
    );

    Catalog {
        total: excursions.len(),
        excursions,
    }
}

/// Unique, sorted item URLs containing the catalog path marker.
pub fn excursion_urls(corpus: &Corpus, config: &CatalogConfig) -> Vec<String> {
    let mut urls: Vec<String> = corpus
        .excursions
        .iter()
        .map(|item| item.address.as_str())
        .filter(|url| !url.is_empty() && url.contains(config.url_list_marker.as_str()))
        .map(str::to_string)
        .collect();
    urls.sort();
    urls.dedup();
    urls
}

fn is_detail_page(url: &str, config: &CatalogConfig) -> bool {
    if url.is_empty() || config.excluded_urls.iter().any(|u| u == url) {
        return false;
    }
    if !url.contains(config.detail_marker.as_str()) {
        return false;
    }
    !contains_any(url, &config.excluded_url_markers)
}

fn build_entry(item: &BookableItem, config: &CatalogConfig) -> CatalogEntry {
    let images = select_images(&item.images, config);
    debug!("Catalog entry {} with {} images", item.address, images.len());

    CatalogEntry {
        url: item.address.clone(),
        title: item.title.clone(),
        description: item.description.clone(),
        price: item.price.clone(),
        duration: item.duration.clone(),
        pickup_points: item.pickup_points.clone(),
        additional_costs: item.additional_costs.clone(),
        image_count: images.len(),
        images,
        content: clean_content(item, config),
        links: item.content.links.clone(),
        category: region(&item.address, config),
        price_rub: item.price.as_deref().and_then(parse_rub_amount),
    }
}

/// Product images only; the first one is the main image.
fn select_images(images: &[ImageRef], config: &CatalogConfig) -> Vec<CatalogImage> {
    let mut selected: Vec<CatalogImage> = images
        .iter()
        .filter(|img| !img.url.is_empty())
        .filter(|img| !contains_any(&img.url, &config.excluded_image_patterns))
        .filter(|img| contains_any(&img.url, &config.image_markers))
        .map(|img| CatalogImage {
            url: img.url.clone(),
            alt: img.alt.clone(),
            is_main: false,
        })
        .collect();

    if let Some(first) = selected.first_mut() {
        first.is_main = true;
    }
    selected
}

fn clean_content(item: &BookableItem, config: &CatalogConfig) -> CatalogContent {
    let content = &item.content;

    let headings = content
        .headings
        .iter()
        .filter(|h| !config.excluded_headings.contains(&h.text))
        .cloned()
        .collect();

    let paragraphs = content
        .paragraphs
        .iter()
        .filter(|p| !contains_any(p, &config.excluded_paragraph_markers))
        .filter(|p| p.trim().chars().count() > config.min_paragraph_chars)
        .cloned()
        .collect();

    let lists = content
        .lists
        .iter()
        .filter(|list| !list.is_empty())
        .filter(|list| {
            let joined = list.join(" ");
            let is_nav = contains_any(&joined, &config.nav_markers) && list.len() <= config.max_nav_list_items;
            !is_nav && !contains_any(&joined, &config.contact_list_markers)
        })
        .cloned()
        .collect();

    CatalogContent {
        headings,
        paragraphs,
        lists,
    }
}

fn region(url: &str, config: &CatalogConfig) -> String {
    config
        .regions
        .iter()
        .find(|rule| url.contains(rule.marker.as_str()))
        .map(|rule| rule.region.clone())
        .unwrap_or_else(|| config.default_region.clone())
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}
