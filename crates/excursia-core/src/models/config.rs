//! Configuration structures for classification, extraction and export.

use serde::{Deserialize, Serialize};

/// Main configuration for the excursia pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcursiaConfig {
    /// Page classifier configuration.
    pub classifier: ClassifierConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Catalog export configuration.
    pub catalog: CatalogConfig,
}

/// Keyword sets and structural boosts used by the page classifier.
///
/// Keywords are matched case-insensitively as substrings of the search
/// buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Excursion, route and landmark terms plus the item catalog path marker.
    pub bookable_keywords: Vec<String>,

    /// Guide, transfer, accommodation and event terms plus the services path marker.
    pub service_keywords: Vec<String>,

    /// Contact vocabulary.
    pub contact_keywords: Vec<String>,

    /// Added to the bookable score when a currency amount is present.
    pub price_boost: u32,

    /// Added to the bookable score when a duration amount is present.
    pub duration_boost: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            bookable_keywords: strings(&[
                "экскурс",
                "excursion",
                "/ekskursii/",
                "маршрут",
                "roza",
                "gazprom",
                "olimp",
                "ritsa",
                "afon",
                "vodopad",
                "delfinariy",
                "akvapark",
                "красная поляна",
                "абхазия",
                "сочи",
                "обзорная",
                "кольцо",
                "водопад",
                "пещера",
                "монастырь",
                "дач",
                "чай",
                "ахун",
                "агур",
            ]),
            service_keywords: strings(&[
                "услуг",
                "service",
                "/uslugi/",
                "gid",
                "переводчик",
                "гид",
                "transfer",
                "трансфер",
                "размещение",
                "razmeshchenie",
                "мероприятие",
                "meropriyatie",
                "организация",
            ]),
            contact_keywords: strings(&["контакт", "contact", "телефон", "адрес", "email", "почта"]),
            price_boost: 2,
            duration_boost: 2,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// A simple `<price> - <description>` cost is accepted only when the
    /// lowercased description contains one of these words.
    pub cost_allow_list: Vec<String>,

    /// Literal label that precedes a block of additional costs.
    pub additional_costs_label: String,

    /// How many characters after the label the strict cost-line pass reads.
    pub label_window_chars: usize,

    /// Word a strict cost-line description must contain.
    pub label_required_word: String,

    /// Pages whose search buffer exceeds this many characters are skipped.
    pub max_buffer_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            cost_allow_list: strings(&["обед", "канат", "билет", "тариф", "дегустация"]),
            additional_costs_label: "Дополнительные расходы".to_string(),
            label_window_chars: 1000,
            label_required_word: "билет".to_string(),
            max_buffer_chars: 1_000_000,
        }
    }
}

/// Catalog export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Item URLs must contain this marker to be exported.
    pub detail_marker: String,

    /// Item URLs containing any of these are listing pages, not items.
    pub excluded_url_markers: Vec<String>,

    /// Exact URLs that are never items (site root).
    pub excluded_urls: Vec<String>,

    /// Image URLs containing any of these are site chrome.
    pub excluded_image_patterns: Vec<String>,

    /// An image is kept only if its URL contains one of these.
    pub image_markers: Vec<String>,

    /// Footer headings dropped from exported content.
    pub excluded_headings: Vec<String>,

    /// Paragraphs containing any of these are legal or contact boilerplate.
    pub excluded_paragraph_markers: Vec<String>,

    /// Paragraphs must be longer than this many characters (after trimming).
    pub min_paragraph_chars: usize,

    /// Lists mentioning any of these and no longer than `max_nav_list_items`
    /// are navigation menus.
    pub nav_markers: Vec<String>,

    pub max_nav_list_items: usize,

    /// Lists mentioning any of these are contact blocks.
    pub contact_list_markers: Vec<String>,

    /// URL marker to region label, first match wins.
    pub regions: Vec<RegionRule>,

    /// Region for items matching no rule.
    pub default_region: String,

    /// Marker selecting item URLs for the plain URL list.
    pub url_list_marker: String,
}

/// Maps a URL marker to a region label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRule {
    pub marker: String,
    pub region: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            detail_marker: "detail.html".to_string(),
            excluded_url_markers: strings(&["dirDesc.html", "kalendar.html"]),
            excluded_urls: strings(&["https://hostaotdykh.ru", "https://hostaotdykh.ru/"]),
            excluded_image_patterns: strings(&[
                "oldlogo.png",
                "mod_ebwhatsappchat",
                "mc.yandex.ru",
                "ps4-5.png",
                "Sergeyqweqwe.jpg",
                "filetype_jpg.png",
                "vmgeneral",
                "components/com_virtuemart/assets",
            ]),
            image_markers: strings(&["virtuemart/product", "images/virtuemart"]),
            excluded_headings: strings(&["ССЫЛКИ", "Популярное", "Контакты", "О нас", "Награды"]),
            excluded_paragraph_markers: strings(&[
                "ООО \"Хостинский Отдых\"",
                "ИНН:",
                "ОГРН:",
                "КПП:",
                "Политика конфиденциальности",
                "Условия возврата",
                "Способы оплаты",
                "Здравствуйте. У вас возникли вопросы?",
                "Этот адрес электронной почты защищён от спам-ботов",
                "8 (988)",
                "8 (918)",
                "г. Сочи, ул.",
            ]),
            min_paragraph_chars: 10,
            nav_markers: strings(&[
                "Главная",
                "О компании",
                "Экскурсии",
                "Туристам",
                "Услуги",
                "Контакты",
                "О нас",
                "Награды",
                "Сочи",
                "Абхазия",
                "Услуги гидов",
                "Трансфер",
                "Размещение",
            ]),
            max_nav_list_items: 15,
            contact_list_markers: strings(&["8 (988)", "8 (918)", "Этот адрес электронной почты", "г. Сочи"]),
            regions: vec![
                RegionRule {
                    marker: "ekskursii-sochi".to_string(),
                    region: "Сочи".to_string(),
                },
                RegionRule {
                    marker: "ekskursii-abkhaziya".to_string(),
                    region: "Абхазия".to_string(),
                },
            ],
            default_region: "Общие".to_string(),
            url_list_marker: "ekskursii".to_string(),
        }
    }
}

impl ExcursiaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
