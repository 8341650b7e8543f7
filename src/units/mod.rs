//! Measurement unit handling
//!
//! Alias table, edit distance, and the normalizer that ties them together.

pub mod aliases;
pub mod category;
pub mod distance;
pub mod normalizer;

pub use aliases::{aliases_for, canonical_units, UnitAlias, UNIT_ALIASES};
pub use category::{categorize_unit, UnitCategory};
pub use distance::levenshtein;
pub use normalizer::{
    normalize_unit, normalize_unit_in_place, resolve_unit, NormalizationResult,
    MAX_FUZZY_DISTANCE, SHORT_ALIAS_LEN,
};
