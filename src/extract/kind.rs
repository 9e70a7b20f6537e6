//! Interaction-type detection.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::InteractionType;

static CALL_CUES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(call|phone|tele)\b").expect("call cue pattern is valid"));

static EMAIL_CUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bemail\b").expect("email cue pattern is valid"));

/// Detect how the interaction took place from keyword cues.
///
/// Defaults to `Meeting`. Whole-word `call`/`phone`/`tele` overrides to
/// `Call`; whole-word `email` is evaluated after and overrides again
/// (last-matching-rule-wins, kept exactly as the source evaluates it).
pub fn extract_interaction_type(text: &str) -> InteractionType {
    let mut kind = InteractionType::Meeting;
    if CALL_CUES.is_match(text) {
        kind = InteractionType::Call;
    }
    if EMAIL_CUE.is_match(text) {
        kind = InteractionType::Email;
    }
    kind
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_meeting() {
        assert_eq!(
            extract_interaction_type("Met Dr. Smith, positive"),
            InteractionType::Meeting
        );
    }

    #[test]
    fn call_cues_are_case_insensitive_whole_words() {
        assert_eq!(extract_interaction_type("Call with Dr. Patel"), InteractionType::Call);
        assert_eq!(extract_interaction_type("quick PHONE sync"), InteractionType::Call);
        // "telehealth" must not match the whole-word "tele" cue.
        assert_eq!(
            extract_interaction_type("telehealth portal demo"),
            InteractionType::Meeting
        );
    }

    #[test]
    fn email_overrides_an_earlier_call_match() {
        assert_eq!(
            extract_interaction_type("followed up the call by email"),
            InteractionType::Email
        );
    }
}
