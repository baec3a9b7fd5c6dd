//! Pickup point extraction.
//!
//! Every family contributes; a location is owned by the first family that
//! names it, later matches for the same location are dropped.

use tracing::debug;

use crate::models::item::PickupPoint;

use super::families::{Activation, PICKUP_FAMILIES, PickupCaptures};
use super::FieldExtractor;

/// Pickup point extractor.
pub struct PickupExtractor;

impl PickupExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PickupExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PickupExtractor {
    type Output = PickupPoint;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut points: Vec<PickupPoint> = Vec::new();

        for family in PICKUP_FAMILIES.iter() {
            if family.activation == Activation::Fallback && !points.is_empty() {
                continue;
            }

            for caps in family.pattern.captures_iter(text) {
                let Some(point) = build_point(&caps, family.captures) else {
                    continue;
                };

                if points.iter().any(|p| p.location == point.location) {
                    debug!("Duplicate pickup location {} from {}", point.location, family.name);
                    continue;
                }

                debug!("Pickup {} ({}) matched by {}", point.location, point.price_display, family.name);
                points.push(point);
            }
        }

        points
    }
}

fn build_point(caps: &regex::Captures<'_>, layout: PickupCaptures) -> Option<PickupPoint> {
    let location = caps.get(layout.location)?.as_str().to_string();
    let price = caps.get(layout.price)?.as_str();

    let child = layout
        .child_price
        .zip(layout.child_age)
        .and_then(|(price_idx, age_idx)| Some((caps.get(price_idx)?.as_str(), caps.get(age_idx)?.as_str())));

    Some(match child {
        Some((child_price, child_age)) => PickupPoint {
            location,
            price_adult: Some(format!("{price}р.")),
            price_child: Some(format!("{child_price}р.")),
            child_age_range: Some(child_age.to_string()),
            price_display: format!("{price}р. взр. / {child_price}р. дет. ({child_age})"),
            ..PickupPoint::default()
        },
        None => PickupPoint {
            location,
            price_display: format!("{price} р."),
            ..PickupPoint::default()
        },
    })
}
