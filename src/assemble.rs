//! Record assembly — normalizes candidate fields into the canonical shape.
//!
//! Candidates arrive from either path (rule-based extraction or model tool
//! arguments) as loose strings. Assembly applies the reconciliation policy,
//! fills defaults, and normalizes the enumerated fields, so both paths
//! converge on an identical [`InteractionRecord`].

use chrono::{DateTime, Local};

use crate::reconcile;
use crate::record::{FieldName, FieldUpdate, InteractionRecord, InteractionType, Sentiment};

/// Loose candidate fields prior to normalization.
///
/// All fields are optional in spirit: unset strings default to empty,
/// unset lists to empty sequences.
#[derive(Debug, Clone, Default)]
pub struct Candidate {
    /// Person identifier as extracted or supplied.
    pub hcp_name: String,
    /// Interaction type as loose text (`"call"`, `"Meeting"`, ...).
    pub interaction_type: String,
    /// Sentiment as loose text (`"positive"`, `"Neutral"`, ...).
    pub sentiment: String,
    /// Date as supplied — may be empty or a relative word.
    pub date: String,
    /// Time as supplied — may be empty or a placeholder.
    pub time: String,
    /// Topic notes.
    pub topics_discussed: String,
    /// Other people present.
    pub attendees: Vec<String>,
    /// Materials handed over or shown.
    pub materials_shared: Vec<String>,
    /// Product samples left with the HCP.
    pub samples_distributed: Vec<String>,
    /// Outcome notes.
    pub outcomes: String,
    /// Agreed follow-up actions.
    pub follow_up_actions: String,
}

impl From<InteractionRecord> for Candidate {
    fn from(r: InteractionRecord) -> Self {
        Self {
            hcp_name: r.hcp_name,
            interaction_type: r.interaction_type.as_str().to_owned(),
            sentiment: r.sentiment.as_str().to_owned(),
            date: r.date,
            time: r.time,
            topics_discussed: r.topics_discussed,
            attendees: r.attendees,
            materials_shared: r.materials_shared,
            samples_distributed: r.samples_distributed,
            outcomes: r.outcomes,
            follow_up_actions: r.follow_up_actions,
        }
    }
}

/// Errors from record assembly.
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    /// An `UPDATE_FIELD` targeted a field outside the recognised set.
    /// Surfaced to the caller as a rejected edit, not retried.
    #[error("unknown field: {field:?}")]
    UnknownField {
        /// The unrecognised field name.
        field: String,
    },
}

/// Assemble a `FILL_FORM` record from a candidate.
///
/// Applies [`reconcile`](crate::reconcile) to date/time, normalizes
/// sentiment and interaction type to their enumerated values (unparseable
/// input falls back to the defaults rather than failing), and leaves the
/// remaining fields as supplied.
pub fn fill_form(candidate: Candidate, now: DateTime<Local>) -> InteractionRecord {
    let mut record = InteractionRecord {
        hcp_name: candidate.hcp_name,
        interaction_type: InteractionType::parse(&candidate.interaction_type)
            .unwrap_or_default(),
        sentiment: Sentiment::parse(&candidate.sentiment).unwrap_or_default(),
        date: candidate.date,
        time: candidate.time,
        topics_discussed: candidate.topics_discussed,
        attendees: candidate.attendees,
        materials_shared: candidate.materials_shared,
        samples_distributed: candidate.samples_distributed,
        outcomes: candidate.outcomes,
        follow_up_actions: candidate.follow_up_actions,
    };
    reconcile::reconcile(&mut record, now);
    record
}

/// Validate an `UPDATE_FIELD` edit.
///
/// The field must be one of the recognised form fields. Sentiment values
/// are normalized to canonical capitalization before being returned;
/// all other values pass through verbatim. Nothing is persisted — the
/// caller applies the edit to its own form state.
///
/// # Errors
///
/// Returns [`AssembleError::UnknownField`] for an unrecognised field name.
pub fn update_field(field: &str, value: &str) -> Result<FieldUpdate, AssembleError> {
    let field = FieldName::parse(field).map_err(|_| AssembleError::UnknownField {
        field: field.to_owned(),
    })?;

    let value = if field == FieldName::Sentiment {
        match Sentiment::parse(value) {
            Ok(s) => s.canonical().to_owned(),
            Err(_) => value.to_owned(),
        }
    } else {
        value.to_owned()
    };

    Ok(FieldUpdate { field, value })
}
