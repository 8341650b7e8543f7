//! Ingredient unit normalization
//!
//! Maps free-typed measurement text ("Tablespoons", "tbspn", "teaspoom") to a
//! canonical abbreviation. Exact alias hits win outright; otherwise the
//! nearest alias by edit distance is adopted when it is close enough. Input
//! that matches nothing is kept as typed.

use serde::Serialize;

use super::aliases::{self, UNIT_ALIASES};
use super::distance::levenshtein;

/// Largest edit distance accepted for a fuzzy match
pub const MAX_FUZZY_DISTANCE: usize = 2;

/// Fuzzy candidates must be longer than this many characters
pub const SHORT_ALIAS_LEN: usize = 2;

/// How a raw unit string was resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum NormalizationResult {
    /// Input was blank; the field is left untouched
    Empty,
    /// Input is a known spelling
    Exact { canonical: &'static str },
    /// Input is within `MAX_FUZZY_DISTANCE` of a known spelling
    Fuzzy {
        canonical: &'static str,
        alias: &'static str,
        distance: usize,
    },
    /// No acceptable match; the input is kept as typed
    Unchanged,
}

impl NormalizationResult {
    pub fn canonical(&self) -> Option<&'static str> {
        match self {
            NormalizationResult::Exact { canonical }
            | NormalizationResult::Fuzzy { canonical, .. } => Some(canonical),
            NormalizationResult::Empty | NormalizationResult::Unchanged => None,
        }
    }

    /// The value to store for `raw`
    pub fn apply(&self, raw: &str) -> String {
        match self.canonical() {
            Some(canonical) => canonical.to_string(),
            None => raw.to_string(),
        }
    }
}

/// Resolve a unit string against the alias table
pub fn resolve_unit(raw: &str) -> NormalizationResult {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return NormalizationResult::Empty;
    }

    if let Some(canonical) = aliases::lookup(&normalized) {
        return NormalizationResult::Exact { canonical };
    }

    // Nearest alias over the whole table; first one wins on ties, so the
    // result depends on UNIT_ALIASES order. The guards below only see the winner.
    let mut best: Option<(&'static str, &'static str, usize)> = None;
    for entry in UNIT_ALIASES {
        let dist = levenshtein(&normalized, entry.alias);
        let current_best = best.map(|(_, _, d)| d).unwrap_or(usize::MAX);
        if dist < current_best {
            best = Some((entry.alias, entry.canonical, dist));
        }
    }

    match best {
        Some((alias, canonical, distance))
            if distance <= MAX_FUZZY_DISTANCE && alias.chars().count() > SHORT_ALIAS_LEN =>
        {
            tracing::debug!("Fuzzy unit match: '{}' -> '{}' via '{}' (distance {})", raw, canonical, alias, distance);
            NormalizationResult::Fuzzy {
                canonical,
                alias,
                distance,
            }
        }
        Some((alias, _, distance)) => {
            tracing::trace!("Rejected unit match for '{}': nearest '{}' at distance {}", raw, alias, distance);
            NormalizationResult::Unchanged
        }
        None => NormalizationResult::Unchanged,
    }
}

/// Canonical form of `raw`, or `raw` itself when nothing matches
pub fn normalize_unit(raw: &str) -> String {
    resolve_unit(raw).apply(raw)
}

/// Blur-event entry point: rewrites the slot in place.
///
/// A blank slot is left as it is. Returns true if the stored value changed.
pub fn normalize_unit_in_place(slot: &mut String) -> bool {
    let result = resolve_unit(slot);
    match result.canonical() {
        Some(canonical) if slot != canonical => {
            *slot = canonical.to_string();
            true
        }
        _ => false,
    }
}
