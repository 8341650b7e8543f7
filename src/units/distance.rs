//! Levenshtein edit distance

/// Minimum number of single-character insertions, deletions, or
/// substitutions turning `a` into `b`. Compares chars, not bytes.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            cur[j + 1] = (prev[j + 1] + 1) // deletion
                .min(cur[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        assert_eq!(levenshtein("tbsp", "tbsp"), 0);
        assert_eq!(levenshtein("", ""), 0);
    }

    #[test]
    fn test_empty_side() {
        assert_eq!(levenshtein("", "cup"), 3);
        assert_eq!(levenshtein("gallon", ""), 6);
    }

    #[test]
    fn test_single_edits() {
        assert_eq!(levenshtein("tablespon", "tablespoon"), 1);
        assert_eq!(levenshtein("teaspoom", "teaspoon"), 1);
        assert_eq!(levenshtein("cupz", "cup"), 1);
    }

    #[test]
    fn test_classic_pair() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [("pint", "pinch"), ("quart", "qt"), ("liter", "litre")];
        for (a, b) in pairs {
            assert_eq!(levenshtein(a, b), levenshtein(b, a));
        }
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        assert_eq!(levenshtein("crème", "creme"), 1);
    }

    #[test]
    fn test_agrees_with_strsim() {
        let words = [
            "tablespoon", "tbsp", "teaspoon", "tsp", "fl oz", "fluid ounce",
            "kilogram", "kg", "pinch", "pint", "xyz123", "", "gallons", "clove",
        ];
        for a in words {
            for b in words {
                assert_eq!(levenshtein(a, b), strsim::levenshtein(a, b), "{:?} vs {:?}", a, b);
            }
        }
    }
}
