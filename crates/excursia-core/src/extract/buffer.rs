//! Search buffers composed from a page's text groups.

use crate::models::page::RawPage;

/// Per-family search buffers for one page.
///
/// Text units are joined with newlines, so `$` in multi-line patterns marks
/// the end of a paragraph, list item or block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBuffers {
    /// Paragraphs, list items, loose blocks and inline labels. Price and
    /// duration are searched here.
    pub fields: String,

    /// The field buffer plus headings and data attributes. Pickup points and
    /// costs often sit in tables and badges, so they get the wider buffer.
    pub logistics: String,
}

impl SearchBuffers {
    /// Build the buffers for a page.
    pub fn from_page(page: &RawPage) -> Self {
        let content = &page.content;

        let field_units: Vec<&str> = content
            .paragraphs
            .iter()
            .map(String::as_str)
            .chain(content.list_items())
            .chain(content.loose_blocks.iter().map(String::as_str))
            .chain(content.inline_labels.iter().map(String::as_str))
            .filter(|unit| !unit.trim().is_empty())
            .collect();

        let logistics_units: Vec<&str> = content
            .headings
            .iter()
            .map(|h| h.text.as_str())
            .chain(field_units.iter().copied())
            .chain(content.data_attributes.iter().map(String::as_str))
            .filter(|unit| !unit.trim().is_empty())
            .collect();

        Self {
            fields: field_units.join("\n"),
            logistics: logistics_units.join("\n"),
        }
    }

    /// Size of the larger buffer in characters.
    pub fn char_len(&self) -> usize {
        self.logistics.chars().count().max(self.fields.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_buffer_composition() {
        let page = RawPage::new("u")
            .with_title("Заголовок страницы")
            .with_heading("h2", "Точки посадки")
            .with_paragraph("Первый абзац")
            .with_list(["пункт 1", "пункт 2"])
            .with_loose_block("блок")
            .with_inline_label("метка");

        let buffers = SearchBuffers::from_page(&page);

        assert_eq!(buffers.fields, "Первый абзац\nпункт 1\nпункт 2\nблок\nметка");
        assert_eq!(
            buffers.logistics,
            "Точки посадки\nПервый абзац\nпункт 1\nпункт 2\nблок\nметка"
        );
        assert!(!buffers.fields.contains("Заголовок"));
    }

    #[test]
    fn test_empty_page_has_empty_buffers() {
        let buffers = SearchBuffers::from_page(&RawPage::default());

        assert_eq!(buffers, SearchBuffers::default());
        assert_eq!(buffers.char_len(), 0);
    }
}
