//! Unit tools
//!
//! Expose the normalizer so a client can check a spelling before saving.

use serde::Serialize;

use crate::units::{
    aliases_for, canonical_units, categorize_unit, resolve_unit, NormalizationResult,
    UnitCategory,
};

/// Response for normalize_unit
#[derive(Debug, Serialize)]
pub struct NormalizeUnitResponse {
    pub input: String,
    pub normalized: String,
    pub changed: bool,
    pub result: NormalizationResult,
    pub category: UnitCategory,
}

/// A canonical unit and every spelling that maps to it
#[derive(Debug, Serialize)]
pub struct UnitAliasEntry {
    pub canonical: &'static str,
    pub category: UnitCategory,
    pub aliases: Vec<&'static str>,
}

/// Response for list_unit_aliases
#[derive(Debug, Serialize)]
pub struct ListUnitAliasesResponse {
    pub units: Vec<UnitAliasEntry>,
    pub count: usize,
}

pub fn normalize_unit(raw: &str) -> NormalizeUnitResponse {
    let result = resolve_unit(raw);
    let normalized = result.apply(raw);
    NormalizeUnitResponse {
        input: raw.to_string(),
        changed: normalized != raw,
        category: categorize_unit(&normalized),
        normalized,
        result,
    }
}

/// List alias spellings, for one canonical unit or all of them
pub fn list_unit_aliases(canonical: Option<&str>) -> Result<ListUnitAliasesResponse, String> {
    let all = canonical_units();
    let selected: Vec<&'static str> = match canonical.map(str::trim).filter(|c| !c.is_empty()) {
        Some(wanted) => {
            let wanted = wanted.to_lowercase();
            match all.iter().find(|c| **c == wanted) {
                Some(found) => vec![*found],
                None => {
                    return Err(format!(
                        "Unknown canonical unit '{}'. Known units: {}",
                        wanted,
                        all.join(", ")
                    ))
                }
            }
        }
        None => all,
    };

    let units: Vec<UnitAliasEntry> = selected
        .into_iter()
        .map(|canonical| UnitAliasEntry {
            canonical,
            category: categorize_unit(canonical),
            aliases: aliases_for(canonical),
        })
        .collect();

    Ok(ListUnitAliasesResponse {
        count: units.len(),
        units,
    })
}
