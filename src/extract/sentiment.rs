//! Sentiment extraction via keyword polarity.

use crate::record::Sentiment;

/// Keywords indicating a positive reception.
pub const POSITIVE_KEYWORDS: &[&str] = &["positive", "liked", "good", "interested", "keen"];

/// Keywords indicating a negative reception.
pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "negative",
    "not interested",
    "concern",
    "concerns",
    "disliked",
    "issue",
    "hesitant",
];

/// Keywords indicating an explicitly neutral reception.
pub const NEUTRAL_KEYWORDS: &[&str] = &["neutral", "no opinion", "ok", "okay"];

/// Classify the sentiment of `text` by case-insensitive keyword membership.
///
/// The keyword sets are fixed contract constants. Membership-testing order
/// is positive, then negative, then neutral, then the neutral default —
/// texts matching more than one set must classify deterministically, so the
/// order is load-bearing. Membership is substring-based, matching the
/// source behaviour ("not interested" contains "interested" and therefore
/// classifies positive).
pub fn extract_sentiment(text: &str) -> Sentiment {
    let lower = text.to_lowercase();

    if POSITIVE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Sentiment::Positive;
    }
    if NEGATIVE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Sentiment::Negative;
    }
    if NEUTRAL_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Sentiment::Neutral;
    }

    Sentiment::Neutral
}
