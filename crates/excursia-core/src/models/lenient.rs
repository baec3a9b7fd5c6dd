//! Tolerant deserializers for flattened text groups.
//!
//! Crawled corpora are produced by several generations of the flattener, so a
//! group may be missing, `null`, a bare string instead of a list, or contain
//! numbers. None of that is fatal: whatever cannot be read as text becomes
//! empty, and records of the wrong shape are dropped.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::debug;

use super::page::{ContentGroups, Heading, Link};

/// Deserialize `null` as the type's default value.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Optional text; numbers and booleans are stringified.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value))
}

/// Text groups of a page. Anything but an object reads as no content.
pub fn content<'de, D>(deserializer: D) -> Result<ContentGroups, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        if !value.is_null() {
            debug!("Ignoring content of type {}", type_name(&value));
        }
        return Ok(ContentGroups::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// A list of object records; entries that do not read as `T` are dropped.
pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(object_records(value).unwrap_or_default())
}

/// Raw list entries, kept as they are; a non-list reads as empty.
pub fn values<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items),
        _ => Ok(Vec::new()),
    }
}

/// Like [`records`], but `null` and non-lists stay absent.
pub fn optional_records<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(object_records(value))
}

/// An object; anything else reads as absent.
pub fn optional_object<'de, D>(deserializer: D) -> Result<Option<Map<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(fields) => Ok(Some(fields)),
        _ => Ok(None),
    }
}

/// An object; anything else reads as empty.
pub fn object<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_object(deserializer)?.unwrap_or_default())
}

/// A flat list of strings; scalars are stringified, everything else dropped.
pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        other => scalar_text(&other).into_iter().collect(),
    })
}

/// List-item groups. A bare string becomes a single-item group.
pub fn list_groups<'de, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(groups) = value else {
        return Ok(Vec::new());
    };

    Ok(groups
        .iter()
        .filter_map(|group| match group {
            Value::Array(items) => Some(items.iter().filter_map(scalar_text).collect()),
            other => scalar_text(other).map(|text| vec![text]),
        })
        .collect())
}

/// Heading records. A bare string is accepted as a heading without a level.
pub fn headings<'de, D>(deserializer: D) -> Result<Vec<Heading>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .iter()
        .filter_map(|item| match item {
            Value::Object(fields) => {
                let mut extra = fields.clone();
                Some(Heading {
                    level: take_text(&mut extra, "level"),
                    text: take_text(&mut extra, "text"),
                    extra,
                })
            }
            other => scalar_text(other).map(|text| Heading {
                text,
                ..Heading::default()
            }),
        })
        .collect())
}

/// Link records; entries that are not objects are dropped.
pub fn links<'de, D>(deserializer: D) -> Result<Vec<Link>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .iter()
        .filter_map(|item| item.as_object())
        .map(|fields| {
            let mut extra = fields.clone();
            Link {
                text: take_text(&mut extra, "text"),
                url: take_text(&mut extra, "url"),
                extra,
            }
        })
        .collect())
}

fn object_records<T: DeserializeOwned>(value: Value) -> Option<Vec<T>> {
    let Value::Array(items) = value else {
        return None;
    };

    let total = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if kept.len() < total {
        debug!("Dropped {} malformed records", total - kept.len());
    }
    Some(kept)
}

/// Remove a known key, reading it as text.
fn take_text(fields: &mut Map<String, Value>, key: &str) -> String {
    fields.remove(key).as_ref().and_then(scalar_text).unwrap_or_default()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
