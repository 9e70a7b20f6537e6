//! Date/time reconciliation — replaces placeholder values with "now".
//!
//! Upstream agents are unreliable at leaving date/time blank when the user
//! means "now": instead they hallucinate plausible-looking values. This
//! policy decides, per field, whether the supplied value or the current
//! wall clock is authoritative. It runs unconditionally on every
//! record-creation path (rule-based and model-backed) so both paths
//! produce identical results.

use chrono::{DateTime, Local};

use crate::record::InteractionRecord;

/// Known hallucinated time placeholders, replaced with the current time.
///
/// This list encodes observed model failure modes, not general logic —
/// it is compared case-insensitively and must be preserved exactly.
pub const TIME_PLACEHOLDERS: &[&str] = &["now", "current", "--:--", "09:00", "10:00", "12:00"];

/// Resolve the authoritative date for a record.
///
/// Empty, `"today"`, or `"now"` (case-insensitive) resolve to the current
/// local date. Anything else passes through verbatim: an invalid supplied
/// date is intentionally not validated here.
pub fn reconcile_date(supplied: &str, now: DateTime<Local>) -> String {
    let trimmed = supplied.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("today")
        || trimmed.eq_ignore_ascii_case("now")
    {
        return now.format("%Y-%m-%d").to_string();
    }
    supplied.to_owned()
}

/// Resolve the authoritative time for a record.
///
/// Empty values, values with no digit at all, and the
/// [`TIME_PLACEHOLDERS`] denylist resolve to the current local `HH:MM`.
/// Any other digit-containing value passes through verbatim.
pub fn reconcile_time(supplied: &str, now: DateTime<Local>) -> String {
    let trimmed = supplied.trim();
    let is_placeholder = TIME_PLACEHOLDERS
        .iter()
        .any(|p| trimmed.eq_ignore_ascii_case(p));
    if trimmed.is_empty() || !trimmed.chars().any(|c| c.is_ascii_digit()) || is_placeholder {
        return now.format("%H:%M").to_string();
    }
    supplied.to_owned()
}

/// Apply both reconciliation rules to a record in place.
pub fn reconcile(record: &mut InteractionRecord, now: DateTime<Local>) {
    record.date = reconcile_date(&record.date, now);
    record.time = reconcile_time(&record.time, now);
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn pinned_now() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 8, 30, 14, 45, 0)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn empty_and_relative_dates_resolve_to_today() {
        for supplied in ["", "today", "TODAY", "now"] {
            assert_eq!(reconcile_date(supplied, pinned_now()), "2026-08-30", "for {supplied:?}");
        }
    }

    #[test]
    fn concrete_dates_pass_through_unvalidated() {
        assert_eq!(reconcile_date("2025-12-02", pinned_now()), "2025-12-02");
        // Not validated — passthrough is the contract.
        assert_eq!(reconcile_date("45-19-2025", pinned_now()), "45-19-2025");
    }

    #[test]
    fn placeholder_times_resolve_to_current_time() {
        for supplied in ["", "now", "NOW", "current", "--:--", "09:00", "10:00", "12:00"] {
            assert_eq!(reconcile_time(supplied, pinned_now()), "14:45", "for {supplied:?}");
        }
    }

    #[test]
    fn digit_free_times_resolve_to_current_time() {
        assert_eq!(reconcile_time("afternoon", pinned_now()), "14:45");
    }

    #[test]
    fn concrete_times_pass_through() {
        assert_eq!(reconcile_time("14:30", pinned_now()), "14:30");
        assert_eq!(reconcile_time("09:15", pinned_now()), "09:15");
    }

    #[test]
    fn reconcile_applies_both_rules() {
        let mut record = InteractionRecord {
            date: "today".to_owned(),
            time: "10:00".to_owned(),
            ..InteractionRecord::default()
        };
        reconcile(&mut record, pinned_now());
        assert_eq!(record.date, "2026-08-30");
        assert_eq!(record.time, "14:45");
    }
}
