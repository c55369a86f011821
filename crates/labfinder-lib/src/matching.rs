//! Binary free-text matching used by the lab search.

/// Case-insensitive containment test with an all-tokens fallback.
///
/// Returns true when the whole query appears in `haystack`, or failing that,
/// when every whitespace-separated query token appears somewhere in it.
/// There is no scoring.
pub fn fuzzy_match(haystack: &str, query: &str) -> bool {
    let haystack = haystack.to_lowercase();
    let query = query.to_lowercase();

    if haystack.contains(&query) {
        return true;
    }

    let mut tokens = query.split_whitespace().peekable();
    tokens.peek().is_some() && tokens.all(|token| haystack.contains(token))
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
