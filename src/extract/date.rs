//! Date extraction from free text.

use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("ISO date pattern is valid"));

static DAY_FIRST_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}[-/]\d{2}[-/]\d{4}").expect("day-first pattern is valid"));

/// Extract the first date mention from `text`, resolved to ISO form.
///
/// Search order:
/// 1. `YYYY-MM-DD` — returned exactly as matched.
/// 2. `DD-MM-YYYY` or `DD/MM/YYYY` — reparsed into ISO. If the matched
///    digits are not a real calendar date (e.g. `32-13-2025`), the raw
///    substring is returned unchanged; passing bad input through is the
///    documented tolerance, not an error.
/// 3. No match — `today` in ISO form.
///
/// Only the first match is used; multiple dates are not disambiguated.
pub fn extract_date_on(text: &str, today: NaiveDate) -> String {
    if let Some(m) = ISO_DATE.find(text) {
        return m.as_str().to_owned();
    }

    if let Some(m) = DAY_FIRST_DATE.find(text) {
        let raw = m.as_str();
        let dashed = raw.replace('/', "-");
        return match NaiveDate::parse_from_str(&dashed, "%d-%m-%Y") {
            Ok(d) => d.format("%Y-%m-%d").to_string(),
            Err(_) => raw.to_owned(),
        };
    }

    today.format("%Y-%m-%d").to_string()
}

/// [`extract_date_on`] with today's UTC date as the fallback.
pub fn extract_date(text: &str) -> String {
    extract_date_on(text, Utc::now().date_naive())
}
