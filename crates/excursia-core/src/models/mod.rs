//! Data models for pages, bookable items, the corpus and configuration.

pub mod config;
pub mod corpus;
pub mod item;
pub mod lenient;
pub mod page;

pub use config::ExcursiaConfig;
pub use corpus::{ContactMap, Corpus};
pub use item::{AdditionalCost, BookableItem, ExtractedFields, PickupPoint};
pub use page::{ContentGroups, Heading, ImageRef, Link, RawPage};
