//! Flattened page records as produced by the crawler and HTML flattener.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::corpus::ContactMap;
use super::lenient;

/// A crawled page, flattened into text groups.
///
/// Field names on the wire follow the corpus document (`url`, `divs_text`,
/// `spans_text`); unknown fields are kept in `extra` so records survive a
/// round trip untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    /// Page address.
    #[serde(rename = "url", default, deserialize_with = "lenient::nullable")]
    pub address: String,

    /// Document title.
    #[serde(default, deserialize_with = "lenient::nullable")]
    pub title: String,

    /// Meta description.
    #[serde(default, deserialize_with = "lenient::nullable")]
    pub description: String,

    /// Flattened text groups.
    #[serde(default, deserialize_with = "lenient::content")]
    pub content: ContentGroups,

    /// Image references found on the page.
    #[serde(default, deserialize_with = "lenient::records")]
    pub images: Vec<ImageRef>,

    /// Contact fields found on the page (phones, emails, addresses).
    #[serde(
        default,
        deserialize_with = "lenient::optional_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub contacts: Option<ContactMap>,

    /// Fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawPage {
    /// Create an empty page at the given address.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Append a paragraph.
    pub fn with_paragraph(mut self, text: impl Into<String>) -> Self {
        self.content.paragraphs.push(text.into());
        self
    }

    /// Append a heading.
    pub fn with_heading(mut self, level: impl Into<String>, text: impl Into<String>) -> Self {
        self.content.headings.push(Heading {
            level: level.into(),
            text: text.into(),
            ..Heading::default()
        });
        self
    }

    /// Append a list-item group.
    pub fn with_list<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content
            .lists
            .push(items.into_iter().map(Into::into).collect());
        self
    }

    /// Append a loose block text.
    pub fn with_loose_block(mut self, text: impl Into<String>) -> Self {
        self.content.loose_blocks.push(text.into());
        self
    }

    /// Append an inline label text.
    pub fn with_inline_label(mut self, text: impl Into<String>) -> Self {
        self.content.inline_labels.push(text.into());
        self
    }

    /// Attach contact fields.
    pub fn with_contacts(mut self, contacts: ContactMap) -> Self {
        self.contacts = Some(contacts);
        self
    }
}

/// Named buckets of plain text derived from a markup document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentGroups {
    /// Headings in document order.
    #[serde(default, deserialize_with = "lenient::headings")]
    pub headings: Vec<Heading>,

    /// Paragraph texts in document order.
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub paragraphs: Vec<String>,

    /// List-item groups, one per list element.
    #[serde(default, deserialize_with = "lenient::list_groups")]
    pub lists: Vec<Vec<String>>,

    /// Texts of block elements outside paragraphs (price tables, info boxes).
    #[serde(
        rename = "divs_text",
        default,
        deserialize_with = "lenient::text_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub loose_blocks: Vec<String>,

    /// Short inline label texts (price and duration badges).
    #[serde(
        rename = "spans_text",
        default,
        deserialize_with = "lenient::text_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub inline_labels: Vec<String>,

    /// `data-*` attribute dumps such as `data-price: 4000`.
    #[serde(
        default,
        deserialize_with = "lenient::text_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub data_attributes: Vec<String>,

    /// Outgoing links.
    #[serde(
        default,
        deserialize_with = "lenient::links",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<Link>,

    /// Groups this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentGroups {
    /// Iterate over every list item, group by group.
    pub fn list_items(&self) -> impl Iterator<Item = &str> {
        self.lists.iter().flatten().map(String::as_str)
    }
}

/// A heading record (`level` is the tag name, e.g. `h2`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: String,
    pub text: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A link record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub url: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An image reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default, deserialize_with = "lenient::nullable")]
    pub url: String,

    #[serde(default, deserialize_with = "lenient::nullable")]
    pub alt: String,

    /// Page the image was found on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_groups_are_empty() {
        let page: RawPage = serde_json::from_str(r#"{"url": "https://a.ru/x"}"#).unwrap();

        assert_eq!(page.address, "https://a.ru/x");
        assert!(page.content.paragraphs.is_empty());
        assert!(page.content.lists.is_empty());
        assert!(page.contacts.is_none());
    }

    #[test]
    fn test_malformed_groups_are_tolerated() {
        let json = r#"{
            "url": null,
            "title": "Экскурсия",
            "content": {
                "headings": [{"level": "h1", "text": "Гагра"}, "Рица", 7],
                "paragraphs": ["Цена 4000 руб", null, 15],
                "lists": [["a", "b"], "c", null, {"x": 1}],
                "divs_text": "single block",
                "spans_text": null,
                "links": [{"text": "Далее", "url": "/next"}, "junk"]
            }
        }"#;
        let page: RawPage = serde_json::from_str(json).unwrap();

        assert_eq!(page.address, "");
        assert_eq!(page.content.headings.len(), 3);
        assert_eq!(page.content.headings[1].text, "Рица");
        assert_eq!(page.content.paragraphs, vec!["Цена 4000 руб", "15"]);
        assert_eq!(
            page.content.lists,
            vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]]
        );
        assert_eq!(page.content.loose_blocks, vec!["single block"]);
        assert!(page.content.inline_labels.is_empty());
        assert_eq!(page.content.links.len(), 1);
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let json = r#"{"url":"u","title":"t","description":"d","content":{"headings":[],"paragraphs":[],"lists":[],"custom":1},"images":[],"curated_by":"anna"}"#;
        let page: RawPage = serde_json::from_str(json).unwrap();
        let back: Value = serde_json::to_value(&page).unwrap();

        assert_eq!(back["curated_by"], "anna");
        assert_eq!(back["content"]["custom"], 1);
        assert!(back["content"].get("divs_text").is_none());
    }

    #[test]
    fn test_wrong_shaped_content_and_images_are_dropped() {
        let json = r#"{
            "url": "https://a.ru/bad",
            "content": "flattener emitted a bare string",
            "images": ["https://a.ru/i.jpg", {"url": "https://a.ru/ok.jpg"}, 3, {"url": 5}],
            "contacts": ["+7 988 000-00-00"]
        }"#;
        let page: RawPage = serde_json::from_str(json).unwrap();

        assert_eq!(page.content, ContentGroups::default());
        assert_eq!(page.images.len(), 1);
        assert_eq!(page.images[0].url, "https://a.ru/ok.jpg");
        assert!(page.contacts.is_none());
    }

    #[test]
    fn test_heading_and_link_keep_unknown_keys() {
        let json = r#"{"content": {
            "headings": [{"level": "h1", "text": "Гагра", "id": "top"}],
            "links": [{"text": "Далее", "url": "/next", "rel": "nofollow"}]
        }}"#;
        let page: RawPage = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&page).unwrap();

        assert_eq!(page.content.headings[0].text, "Гагра");
        assert!(!page.content.headings[0].extra.contains_key("text"));
        assert_eq!(back["content"]["headings"][0]["id"], "top");
        assert_eq!(back["content"]["links"][0]["rel"], "nofollow");
        assert_eq!(back["content"]["links"][0]["url"], "/next");
    }
}
