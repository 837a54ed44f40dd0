//! Shared utility functions

/// Split a comma-separated argument into lowercase terms.
///
/// Terms are trimmed and empty pieces dropped, so `"Funny, ,ODD"` yields
/// `["funny", "odd"]`.
pub fn split_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Interpret a flag argument. Empty, `0`, `false`, `no` and `off` are false
/// (case-insensitive); anything else is true.
pub fn is_truthy(raw: &str) -> bool {
    let value = raw.trim().to_ascii_lowercase();
    !matches!(value.as_str(), "" | "0" | "false" | "no" | "off")
}
