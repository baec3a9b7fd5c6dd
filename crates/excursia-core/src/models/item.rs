//! Bookable item records and their extracted logistics fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;
use super::page::{ContentGroups, ImageRef, RawPage};

/// A page describing a purchasable guided activity (an excursion).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookableItem {
    /// Page address.
    #[serde(rename = "url", default, deserialize_with = "lenient::nullable")]
    pub address: String,

    #[serde(default, deserialize_with = "lenient::nullable")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient::nullable")]
    pub description: String,

    #[serde(default, deserialize_with = "lenient::content")]
    pub content: ContentGroups,

    #[serde(default, deserialize_with = "lenient::records")]
    pub images: Vec<ImageRef>,

    /// First matching price phrase, verbatim.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub price: Option<String>,

    /// First matching duration phrase, verbatim.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub duration: Option<String>,

    /// Departure locations with fares; `None` when nothing matched.
    #[serde(default, deserialize_with = "lenient::optional_records")]
    pub pickup_points: Option<Vec<PickupPoint>>,

    /// Optional line-item fees; `None` when nothing matched.
    #[serde(default, deserialize_with = "lenient::optional_records")]
    pub additional_costs: Option<Vec<AdditionalCost>>,

    /// Fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BookableItem {
    /// Build an item from a classified page and the fields extracted from it.
    ///
    /// Page-level contact fields have no slot on an item; they are kept in
    /// `extra` under `contacts`.
    pub fn from_page(page: RawPage, fields: ExtractedFields) -> Self {
        let mut extra = page.extra;
        if let Some(contacts) = page.contacts {
            extra.insert("contacts".to_string(), Value::Object(contacts));
        }

        Self {
            address: page.address,
            title: page.title,
            description: page.description,
            content: page.content,
            images: page.images,
            price: fields.price,
            duration: fields.duration,
            pickup_points: non_empty(fields.pickup_points),
            additional_costs: non_empty(fields.additional_costs),
            extra,
        }
    }

    /// Whether any logistics field was found.
    pub fn has_logistics(&self) -> bool {
        self.price.is_some()
            || self.duration.is_some()
            || self.pickup_points.is_some()
            || self.additional_costs.is_some()
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

/// Result of running the extractor over one page.
///
/// Absence of a field (`None` / empty list) means the patterns were tried and
/// nothing matched. Pages that were never extracted carry no
/// `ExtractedFields` at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub price: Option<String>,
    pub duration: Option<String>,
    pub pickup_points: Vec<PickupPoint>,
    pub additional_costs: Vec<AdditionalCost>,
}

/// A named departure location with its fare.
///
/// Unique per item by `location` (case-sensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupPoint {
    #[serde(default, deserialize_with = "lenient::nullable")]
    pub location: String,

    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_adult: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_child: Option<String>,

    /// Age qualifier for the child fare, e.g. `7-14`.
    #[serde(
        rename = "child_age",
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub child_age_range: Option<String>,

    /// Human-readable fare.
    #[serde(rename = "price", default, deserialize_with = "lenient::nullable")]
    pub price_display: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An optional fee layered on top of the base price.
///
/// Unique per item by `description`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalCost {
    #[serde(rename = "price", default, deserialize_with = "lenient::nullable")]
    pub price_display: String,

    #[serde(default, deserialize_with = "lenient::nullable")]
    pub description: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
