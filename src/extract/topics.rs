//! Topic text cleanup — strips boilerplate so the topics field reads clean.

use std::sync::LazyLock;

use regex::Regex;

/// Stopwords removed from topic text (case-insensitive, whole word).
pub const TOPIC_STOPWORDS: &[&str] = &[
    "positive",
    "negative",
    "neutral",
    "shared",
    "brochure",
    "sample",
    "samples",
];

static LEADING_MET_TITLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[Mm]et\s+Dr\.?\s+[A-Z][a-zA-Z]+,?\s*").expect("titled prefix pattern is valid")
});

static LEADING_MET_PLAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[Mm]et\s+[A-Z][a-zA-Z]+,?\s*").expect("plain prefix pattern is valid")
});

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("ISO date pattern is valid"));

static DAY_FIRST_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}[-/]\d{2}[-/]\d{4}").expect("day-first pattern is valid"));

static STOPWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(positive|negative|neutral|shared|brochure|sample|samples)\b")
        .expect("stopword pattern is valid")
});

static REPEATED_COMMAS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",+").expect("comma pattern is valid"));

static REPEATED_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));

/// Extract the topics-discussed text from `text`.
///
/// Stripping order is fixed: the leading `Met [Dr.] Name,` clause first,
/// then recognised date substrings, then stopwords, then comma collapse and
/// whitespace collapse last. Name-prefix removal runs before stopword
/// removal so stopwords embedded in the name clause never matter.
pub fn extract_topics(text: &str) -> String {
    let t = text.trim();

    let t = LEADING_MET_TITLED.replace(t, "");
    let t = LEADING_MET_PLAIN.replace(&t, "");

    let t = ISO_DATE.replace_all(&t, "");
    let t = DAY_FIRST_DATE.replace_all(&t, "");

    let t = STOPWORDS.replace_all(&t, "");

    let t = REPEATED_COMMAS.replace_all(&t, ",");
    let t = t.trim_matches([' ', ',']);
    let t = REPEATED_SPACE.replace_all(t, " ");

    t.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_name_date_and_stopwords() {
        let topics = extract_topics("Met Dr. Smith, positive sentiment, shared brochure, 2025-12-02");
        assert!(!topics.contains("2025-12-02"), "date should be stripped: {topics}");
        assert!(!topics.to_lowercase().contains("brochure"), "stopword kept: {topics}");
        assert!(!topics.to_lowercase().contains("positive"), "stopword kept: {topics}");
        assert!(!topics.contains("Smith"), "name clause kept: {topics}");
        assert!(topics.contains("sentiment"), "content lost: {topics}");
    }

    #[test]
    fn strips_untitled_met_clause() {
        assert_eq!(extract_topics("Met Sarah, new trial protocol"), "new trial protocol");
    }

    #[test]
    fn strips_day_first_dates() {
        let topics = extract_topics("pricing review 30-11-2025, follow up later");
        assert!(!topics.contains("30-11-2025"), "date kept: {topics}");
        assert!(topics.contains("pricing review"));
    }

    #[test]
    fn collapses_commas_left_by_stripping() {
        let topics = extract_topics("dosage update, shared, brochure, next steps");
        assert!(!topics.contains(",,"), "commas not collapsed: {topics}");
        assert!(!topics.starts_with(','), "leading comma: {topics}");
        assert!(!topics.ends_with(','), "trailing comma: {topics}");
    }

    #[test]
    fn stopwords_are_whole_word_only() {
        // "sampling" must survive — only whole-word "sample"/"samples" go.
        let topics = extract_topics("discussed blood sampling procedure");
        assert!(topics.contains("sampling"), "whole-word boundary broken: {topics}");
    }

    #[test]
    fn empty_input_yields_empty() {
        assert_eq!(extract_topics(""), "");
    }
}
