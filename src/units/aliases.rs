//! Static alias table for ingredient measurement units
//!
//! Every recognized spelling maps to one canonical abbreviation. Order matters
//! only for fuzzy tie-breaking, where the first entry at the minimal distance
//! wins.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// A recognized spelling and the canonical unit it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitAlias {
    pub alias: &'static str,
    pub canonical: &'static str,
}

const fn alias(alias: &'static str, canonical: &'static str) -> UnitAlias {
    UnitAlias { alias, canonical }
}

/// All known spellings, lower-case, grouped by canonical unit
pub const UNIT_ALIASES: &[UnitAlias] = &[
    // tablespoon ("T" lower-cases to "t")
    alias("tablespoon", "tbsp"),
    alias("tablespoons", "tbsp"),
    alias("tbsp", "tbsp"),
    alias("tbsps", "tbsp"),
    alias("tbspn", "tbsp"),
    alias("tbs", "tbsp"),
    alias("tbl", "tbsp"),
    alias("t", "tbsp"),
    // teaspoon
    alias("teaspoon", "tsp"),
    alias("teaspoons", "tsp"),
    alias("tsp", "tsp"),
    alias("tsps", "tsp"),
    alias("tspn", "tsp"),
    // cup
    alias("cup", "cup"),
    alias("cups", "cup"),
    alias("c", "cup"),
    // fluid ounce (before ounce so "fl oz" never degrades to "oz")
    alias("fluid ounce", "fl oz"),
    alias("fluid ounces", "fl oz"),
    alias("fl oz", "fl oz"),
    alias("fl. oz", "fl oz"),
    alias("floz", "fl oz"),
    // ounce
    alias("ounce", "oz"),
    alias("ounces", "oz"),
    alias("oz", "oz"),
    // pound
    alias("pound", "lb"),
    alias("pounds", "lb"),
    alias("lb", "lb"),
    alias("lbs", "lb"),
    // gram
    alias("gram", "g"),
    alias("grams", "g"),
    alias("g", "g"),
    alias("gr", "g"),
    // kilogram
    alias("kilogram", "kg"),
    alias("kilograms", "kg"),
    alias("kilo", "kg"),
    alias("kilos", "kg"),
    alias("kg", "kg"),
    alias("kgs", "kg"),
    // liter
    alias("liter", "l"),
    alias("liters", "l"),
    alias("litre", "l"),
    alias("litres", "l"),
    alias("l", "l"),
    // milliliter
    alias("milliliter", "ml"),
    alias("milliliters", "ml"),
    alias("millilitre", "ml"),
    alias("millilitres", "ml"),
    alias("ml", "ml"),
    // quart
    alias("quart", "qt"),
    alias("quarts", "qt"),
    alias("qt", "qt"),
    alias("qts", "qt"),
    // pint
    alias("pint", "pt"),
    alias("pints", "pt"),
    alias("pt", "pt"),
    alias("pts", "pt"),
    // gallon
    alias("gallon", "gal"),
    alias("gallons", "gal"),
    alias("gal", "gal"),
    alias("gals", "gal"),
    // count-like units
    alias("pinch", "pinch"),
    alias("pinches", "pinch"),
    alias("clove", "clove"),
    alias("cloves", "clove"),
    alias("slice", "slice"),
    alias("slices", "slice"),
    alias("can", "can"),
    alias("cans", "can"),
];

static ALIAS_INDEX: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    UNIT_ALIASES
        .iter()
        .map(|a| (a.alias, a.canonical))
        .collect()
});

/// Exact lookup of an already trimmed, lower-cased spelling
pub fn lookup(normalized: &str) -> Option<&'static str> {
    ALIAS_INDEX.get(normalized).copied()
}

/// Every spelling that resolves to the given canonical unit, in table order
pub fn aliases_for(canonical: &str) -> Vec<&'static str> {
    UNIT_ALIASES
        .iter()
        .filter(|a| a.canonical == canonical)
        .map(|a| a.alias)
        .collect()
}

/// Distinct canonical units in table order
pub fn canonical_units() -> Vec<&'static str> {
    let mut units: Vec<&'static str> = Vec::new();
    for a in UNIT_ALIASES {
        if !units.contains(&a.canonical) {
            units.push(a.canonical);
        }
    }
    units
}
