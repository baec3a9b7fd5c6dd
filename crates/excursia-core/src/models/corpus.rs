//! The corpus document: every collection produced by a crawl.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CorpusError, Result};

use super::item::BookableItem;
use super::lenient;
use super::page::RawPage;

/// Contact fields keyed by kind (`phones`, `emails`, `addresses`).
pub type ContactMap = Map<String, Value>;

/// Category-indexed collections of processed pages.
///
/// `images`, `navigation` and `metadata` are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    /// Generic and contact pages.
    #[serde(default, deserialize_with = "lenient::records")]
    pub pages: Vec<RawPage>,

    /// Bookable items.
    #[serde(default, deserialize_with = "lenient::records")]
    pub excursions: Vec<BookableItem>,

    /// Service listings.
    #[serde(default, deserialize_with = "lenient::records")]
    pub services: Vec<RawPage>,

    /// Contact fields merged across contact pages (last writer wins).
    #[serde(default, deserialize_with = "lenient::object")]
    pub contacts: ContactMap,

    #[serde(default, deserialize_with = "lenient::values")]
    pub navigation: Vec<Value>,

    #[serde(default, deserialize_with = "lenient::values")]
    pub images: Vec<Value>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub metadata: Map<String, Value>,
}

impl Corpus {
    /// Parse a corpus document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CorpusError::Parse(e.to_string()).into())
    }

    /// Load a corpus document from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save the corpus as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Total number of records across the three page collections.
    pub fn record_count(&self) -> usize {
        self.pages.len() + self.excursions.len() + self.services.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_minimal_corpus() {
        let corpus = Corpus::from_json_str(r#"{"pages": [{"url": "https://a.ru"}]}"#).unwrap();

        assert_eq!(corpus.pages.len(), 1);
        assert!(corpus.excursions.is_empty());
        assert!(corpus.contacts.is_empty());
        assert_eq!(corpus.record_count(), 1);
    }

    #[test]
    fn test_null_collections_are_empty() {
        let corpus =
            Corpus::from_json_str(r#"{"pages": null, "contacts": null, "metadata": null}"#).unwrap();

        assert!(corpus.pages.is_empty());
        assert!(corpus.metadata.is_empty());
    }

    #[test]
    fn test_malformed_records_do_not_abort_corpus() {
        let json = r#"{
            "pages": [
                {"url": "https://a.ru/good", "content": {"paragraphs": ["Контакты"]}},
                {"url": "https://a.ru/bad", "content": "flattener emitted a bare string"},
                {"url": "https://a.ru/pics", "images": ["https://a.ru/i.jpg"]},
                "https://a.ru/not-a-record"
            ],
            "excursions": [{"url": "https://a.ru/old", "price": 4000}],
            "navigation": "menu",
            "metadata": ["crawl"]
        }"#;
        let corpus = Corpus::from_json_str(json).unwrap();

        let urls: Vec<_> = corpus.pages.iter().map(|p| p.address.as_str()).collect();
        assert_eq!(urls, vec!["https://a.ru/good", "https://a.ru/bad", "https://a.ru/pics"]);
        assert_eq!(corpus.pages[0].content.paragraphs, vec!["Контакты"]);
        assert!(corpus.pages[2].images.is_empty());
        assert_eq!(corpus.excursions[0].price.as_deref(), Some("4000"));
        assert!(corpus.navigation.is_empty());
        assert!(corpus.metadata.is_empty());
    }

    #[test]
    fn test_unparseable_corpus_is_error() {
        let err = Corpus::from_json_str("[1, 2").unwrap_err();

        assert!(err.to_string().contains("failed to parse corpus"));
    }
}
