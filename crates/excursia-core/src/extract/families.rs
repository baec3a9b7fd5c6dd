//! Declarative pattern-family tables.
//!
//! Table order is priority order. Adding a pattern means adding a row here;
//! the evaluators in `price`, `duration`, `pickup` and `costs` never change.

use lazy_static::lazy_static;
use regex::Regex;

use crate::patterns::*;

use super::ExtractionMatch;

/// A family whose whole (trimmed) match is the field value.
#[derive(Debug)]
pub struct MatchFamily {
    pub name: &'static str,
    pub pattern: &'static Regex,
}

/// When a pickup family runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Every time.
    Always,
    /// Only if no earlier family produced any point.
    Fallback,
}

/// Capture-group layout of a pickup family.
#[derive(Debug, Clone, Copy)]
pub struct PickupCaptures {
    pub location: usize,
    /// Adult fare, or the only fare for single-price forms.
    pub price: usize,
    pub child_price: Option<usize>,
    pub child_age: Option<usize>,
}

#[derive(Debug)]
pub struct PickupFamily {
    pub name: &'static str,
    pub pattern: &'static Regex,
    pub captures: PickupCaptures,
    pub activation: Activation,
}

/// Which slice of the buffer a cost family searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostScope {
    /// The whole logistics buffer.
    Buffer,
    /// Text after the last additional-costs label; skipped when there is no label.
    AfterLabel,
    /// The first `label_window_chars` characters after the label.
    AfterLabelWindow,
}

/// Extra acceptance rule for a cost description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostGuard {
    None,
    /// Description must contain a word from the configured allow-list.
    AllowList,
    /// Description must contain the configured required word.
    RequiredWord,
}

#[derive(Debug)]
pub struct CostFamily {
    pub name: &'static str,
    pub pattern: &'static Regex,
    /// Capture groups of the price tiers, in display order. Missing optional
    /// tiers are skipped.
    pub tiers: &'static [usize],
    pub description: usize,
    pub scope: CostScope,
    pub guard: CostGuard,
}

lazy_static! {
    pub static ref PRICE_FAMILIES: Vec<MatchFamily> = vec![
        MatchFamily { name: "price_labeled", pattern: &PRICE_LABELED },
        MatchFamily { name: "price_trailing", pattern: &PRICE_TRAILING },
        MatchFamily { name: "price_from", pattern: &PRICE_FROM },
    ];

    pub static ref DURATION_FAMILIES: Vec<MatchFamily> = vec![
        MatchFamily { name: "duration_labeled", pattern: &DURATION_LABELED },
        MatchFamily { name: "duration_trailing", pattern: &DURATION_TRAILING },
        MatchFamily { name: "duration_short", pattern: &DURATION_SHORT },
    ];

    pub static ref PICKUP_FAMILIES: Vec<PickupFamily> = vec![
        PickupFamily {
            name: "pickup_dual_price",
            pattern: &PICKUP_DUAL_PRICE,
            captures: PickupCaptures { location: 1, price: 2, child_price: Some(3), child_age: Some(4) },
            activation: Activation::Always,
        },
        PickupFamily {
            name: "pickup_single_price",
            pattern: &PICKUP_SINGLE_PRICE,
            captures: PickupCaptures { location: 1, price: 2, child_price: None, child_age: None },
            activation: Activation::Always,
        },
        PickupFamily {
            name: "pickup_loose",
            pattern: &PICKUP_LOOSE,
            captures: PickupCaptures { location: 1, price: 2, child_price: None, child_age: None },
            activation: Activation::Fallback,
        },
    ];

    pub static ref COST_FAMILIES: Vec<CostFamily> = vec![
        CostFamily {
            name: "cost_three_tier",
            pattern: &COST_THREE_TIER,
            tiers: &[1, 2, 3],
            description: 4,
            scope: CostScope::Buffer,
            guard: CostGuard::None,
        },
        CostFamily {
            name: "cost_two_tier",
            pattern: &COST_TWO_TIER,
            tiers: &[1, 2],
            description: 3,
            scope: CostScope::Buffer,
            guard: CostGuard::None,
        },
        CostFamily {
            name: "cost_label_three_tier",
            pattern: &COST_THREE_TIER,
            tiers: &[1, 2, 3],
            description: 4,
            scope: CostScope::AfterLabel,
            guard: CostGuard::None,
        },
        CostFamily {
            name: "cost_label_line",
            pattern: &COST_LINE_STRICT,
            tiers: &[1, 2, 3],
            description: 4,
            scope: CostScope::AfterLabelWindow,
            guard: CostGuard::RequiredWord,
        },
        CostFamily {
            name: "cost_simple",
            pattern: &COST_SIMPLE,
            tiers: &[1],
            description: 2,
            scope: CostScope::Buffer,
            guard: CostGuard::AllowList,
        },
    ];
}

/// Evaluate first-match families in priority order, one match per family.
///
/// The iterator is lazy, so `.next()` stops at the first family that matches.
pub fn match_families<'a>(
    families: &'a [MatchFamily],
    text: &'a str,
) -> impl Iterator<Item = ExtractionMatch<String>> + 'a {
    families.iter().filter_map(move |family| {
        family.pattern.find(text).map(|m| {
            ExtractionMatch::new(m.as_str().trim().to_string(), family.name)
                .with_position(m.start(), m.end())
        })
    })
}
