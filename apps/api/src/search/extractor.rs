//! Filter Extractor — rule-based intent and filter extraction from a tenant question.
//!
//! Matching is plain substring containment on the lower-cased question, so
//! "hi" also matches inside "this" and "cebu" inside "cebuana". Callers rely on
//! that exact behaviour.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub const GREETING_TOKENS: &[&str] = &["hello", "hi", "hey"];
pub const ROOM_KEYWORDS: &[&str] = &["room", "bedspace", "unit"];
/// Cities DormHub lists dorms in. Dorms outside these are never shown.
pub const ALLOWED_CITIES: &[&str] = &["lapu-lapu", "mandaue"];
pub const BLOCKED_CITIES: &[&str] = &["liloan", "cebu", "others"];

/// 3–5 ASCII digit amounts, optionally prefixed with a currency marker.
/// Other decimal scripts never match, so every capture parses.
static PRICE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?((?-u:\d){3,5})").expect("price pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Intent {
    Greeting,
    BlockedRegion,
    Search,
}

/// Structured constraints pulled from the question.
/// `allowed_cities` empty means "any city on the allow-list".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSet {
    pub allowed_cities: Vec<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
}

impl FilterSet {
    pub fn has_price_bounds(&self) -> bool {
        self.price_min.is_some() || self.price_max.is_some()
    }

    /// Whether a price survives the bounds. Bounds are inclusive.
    pub fn accepts_price(&self, price: f64) -> bool {
        if self.price_min.is_some_and(|min| price < min) {
            return false;
        }
        if self.price_max.is_some_and(|max| price > max) {
            return false;
        }
        true
    }
}

/// Normalizes raw question text the way every extractor step expects it.
pub fn normalize_question(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn contains_any(text: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|token| text.contains(token))
}

/// Classifies a normalized question.
///
/// Greeting wins only when no room keyword is present; a blocked city wins
/// over any allowed city.
pub fn classify_intent(question: &str) -> Intent {
    if contains_any(question, GREETING_TOKENS) && !contains_any(question, ROOM_KEYWORDS) {
        Intent::Greeting
    } else if contains_any(question, BLOCKED_CITIES) {
        Intent::BlockedRegion
    } else {
        Intent::Search
    }
}

/// Allow-listed cities mentioned in the question, in allow-list order.
pub fn requested_cities(question: &str) -> Vec<String> {
    ALLOWED_CITIES
        .iter()
        .filter(|city| question.contains(*city))
        .map(|city| city.to_string())
        .collect()
}

/// Price bounds from numeric tokens, scanned left to right.
///
/// One amount is a ceiling. Two or more: the first two are a range and the
/// rest are ignored. A descending range is flipped so min <= max.
pub fn price_bounds(question: &str) -> (Option<f64>, Option<f64>) {
    let amounts: Vec<f64> = PRICE_PATTERN
        .captures_iter(question)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .take(2)
        .collect();

    match amounts.as_slice() {
        [] => (None, None),
        [max] => (None, Some(*max)),
        [first, second, ..] => (Some(first.min(*second)), Some(first.max(*second))),
    }
}

/// Full extraction: intent plus the filter set for a search.
/// Non-search intents carry an empty filter set.
pub fn extract(question: &str) -> (Intent, FilterSet) {
    let question = normalize_question(question);
    let intent = classify_intent(&question);
    if intent != Intent::Search {
        return (intent, FilterSet::default());
    }

    let (price_min, price_max) = price_bounds(&question);
    let filters = FilterSet {
        allowed_cities: requested_cities(&question),
        price_min,
        price_max,
    };
    (intent, filters)
}
