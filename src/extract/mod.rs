//! Rule-based field extractors — the deterministic fallback path.
//!
//! Each extractor is a pure, total function from raw note text to a
//! best-effort field value. Simple regex/keyword matching rather than
//! LLM-based extraction keeps this path deterministic and available even
//! when no model is configured. Extractors never fail: on no match they
//! return a documented default.

pub mod date;
pub mod kind;
pub mod person;
pub mod sentiment;
pub mod topics;

pub use date::extract_date;
pub use kind::extract_interaction_type;
pub use person::extract_hcp_name;
pub use sentiment::extract_sentiment;
pub use topics::extract_topics;

use chrono::{NaiveDate, Utc};

use crate::record::InteractionRecord;

/// Run all extractors over one utterance and build a candidate record.
///
/// The candidate has no `time` (reconciliation fills it in) and empty
/// list/outcome fields. Date fallback uses `today` so callers can pin the
/// clock in tests.
pub fn extract_candidate_on(text: &str, today: NaiveDate) -> InteractionRecord {
    InteractionRecord {
        hcp_name: extract_hcp_name(text),
        interaction_type: extract_interaction_type(text),
        sentiment: extract_sentiment(text),
        date: date::extract_date_on(text, today),
        time: String::new(),
        topics_discussed: extract_topics(text),
        ..InteractionRecord::default()
    }
}

/// [`extract_candidate_on`] with today's UTC date as the fallback.
pub fn extract_candidate(text: &str) -> InteractionRecord {
    extract_candidate_on(text, Utc::now().date_naive())
}
