//! Utility to normalize measurement units from the command line
//!
//! Units come from the arguments, or one per line on stdin when none are given.
//! Prints `input -> normalized (method)` for each.

use std::io::{self, BufRead, Write};

use recipeshare::units::{resolve_unit, NormalizationResult};

fn describe(result: &NormalizationResult) -> String {
    match result {
        NormalizationResult::Empty => "empty".to_string(),
        NormalizationResult::Exact { .. } => "exact".to_string(),
        NormalizationResult::Fuzzy { alias, distance, .. } => {
            format!("fuzzy: '{}' at distance {}", alias, distance)
        }
        NormalizationResult::Unchanged => "unchanged".to_string(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let inputs: Vec<String> = if args.is_empty() {
        io::stdin().lock().lines().collect::<Result<_, _>>()?
    } else {
        args
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for raw in inputs {
        let result = resolve_unit(&raw);
        writeln!(out, "{:?} -> {:?} ({})", raw, result.apply(&raw), describe(&result))?;
    }

    Ok(())
}
