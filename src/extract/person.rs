//! HCP name extraction from free text.

use std::sync::LazyLock;

use regex::Regex;

static TITLED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bDr\.?\s+([A-Z][a-zA-Z]+(?:\s[A-Z][a-zA-Z]+)?)")
        .expect("titled name pattern is valid")
});

static MET_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bMet\s+([A-Z][a-zA-Z]+(?:\s[A-Z][a-zA-Z]+)?)")
        .expect("met name pattern is valid")
});

/// Extract the HCP's name from `text`.
///
/// Search order:
/// 1. `Dr` / `Dr.` followed by one or two capitalized words — returned with
///    a normalized `"Dr. "` prefix regardless of whether the source had the
///    period.
/// 2. `Met` followed by capitalized word(s), without a title.
/// 3. Empty string.
///
/// Case-sensitive on the capitalization cue: lowercase names are not
/// recognised.
pub fn extract_hcp_name(text: &str) -> String {
    if let Some(caps) = TITLED_NAME.captures(text) {
        if let Some(name) = caps.get(1) {
            return format!("Dr. {}", name.as_str());
        }
    }

    if let Some(caps) = MET_NAME.captures(text) {
        if let Some(name) = caps.get(1) {
            return name.as_str().to_owned();
        }
    }

    String::new()
}
