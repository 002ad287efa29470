/// Decide how an element label should be colored
use std::sync::LazyLock;

use regex::Regex;

use crate::store::{normalize, Classification, ClassificationStore, SharedStore};

/// Labels longer than this (in UTF-16 code units, as the page counts them)
/// are treated as failed/noise results
pub const MAX_LABEL_LEN: usize = 30;

/// Numeric labels at or above this value are never real elements
pub const DEAD_NUMBER_THRESHOLD: f64 = 1_000_000.0;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// The color decision for one element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayColor {
    Proven,
    Disproven,
    /// Leave the element with its native styling
    NoOverride,
}

impl From<Classification> for DisplayColor {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::Proven => DisplayColor::Proven,
            Classification::Disproven => DisplayColor::Disproven,
        }
    }
}

/// Check if a normalized label is one of the large numbers the game spits out
pub fn is_dead_number(text: &str) -> bool {
    if !DIGITS.is_match(text) {
        return false;
    }
    text.parse::<f64>()
        .map(|value| value >= DEAD_NUMBER_THRESHOLD)
        .unwrap_or(false)
}

/// Classify a raw label against a store
///
/// Priority (first match wins):
/// 1. normalized label longer than 30 UTF-16 units → disproven
/// 2. all digits and worth at least one million → disproven
/// 3. label present in the store → its classification
/// 4. otherwise no override
pub fn classify_with(store: &ClassificationStore, raw: &str) -> DisplayColor {
    let text = normalize(raw);

    if text.encode_utf16().count() > MAX_LABEL_LEN {
        DisplayColor::Disproven
    } else if is_dead_number(&text) {
        DisplayColor::Disproven
    } else {
        store
            .get(&text)
            .map(DisplayColor::from)
            .unwrap_or(DisplayColor::NoOverride)
    }
}

/// Classifier bound to a shared store; sees whatever the store holds at call time
#[derive(Debug, Clone)]
pub struct Classifier {
    store: SharedStore,
}

impl Classifier {
    pub fn new(store: SharedStore) -> Self {
        Classifier { store }
    }

    pub fn classify(&self, raw: &str) -> DisplayColor {
        classify_with(&self.store.borrow(), raw)
    }
}
