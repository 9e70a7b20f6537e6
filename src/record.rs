//! Canonical record and UI action types.
//!
//! An [`InteractionRecord`] is the unit of persisted knowledge: one logged
//! rep ↔ HCP interaction. Records are created transiently per request,
//! reconciled, appended to the store as an immutable row, and returned to
//! the caller wrapped in a [`UiAction`] that tells the front end how to
//! update its form.
//!
//! Field names serialize in camelCase to match the wire format the front
//! end expects (`hcpName`, `topicsDiscussed`, ...).

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enumerated fields
// ---------------------------------------------------------------------------

/// Inferred polarity of an interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Favourable reception.
    Positive,
    /// No clear polarity (the default).
    #[default]
    Neutral,
    /// Concerns, objections, or disinterest.
    Negative,
}

impl Sentiment {
    /// Returns the canonical string representation stored in SQLite.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    /// Parse from a stored or supplied text value, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a recognised sentiment.
    pub fn parse(s: &str) -> Result<Self, RecordError> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            _ => Err(RecordError::InvalidEnum {
                field: "sentiment",
                value: s.to_owned(),
            }),
        }
    }

    /// Canonical capitalized form shown in the UI (`"Positive"`, ...).
    pub fn canonical(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

/// How the interaction took place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    /// In-person meeting (the default).
    #[default]
    Meeting,
    /// Phone or tele call.
    Call,
    /// Email exchange.
    Email,
}

impl InteractionType {
    /// Returns the canonical string representation stored in SQLite.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Call => "call",
            Self::Email => "email",
        }
    }

    /// Parse from a stored or supplied text value, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a recognised interaction type.
    pub fn parse(s: &str) -> Result<Self, RecordError> {
        match s.trim().to_lowercase().as_str() {
            "meeting" => Ok(Self::Meeting),
            "call" => Ok(Self::Call),
            "email" => Ok(Self::Email),
            _ => Err(RecordError::InvalidEnum {
                field: "interactionType",
                value: s.to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One logged rep ↔ HCP interaction in its canonical shape.
///
/// After reconciliation, `date` is always a concrete `YYYY-MM-DD` string
/// (never "today"/"now"/empty) and `time` always contains at least one
/// digit and is never a known placeholder value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InteractionRecord {
    /// Extracted or supplied person identifier; empty if unresolved.
    pub hcp_name: String,
    /// How the interaction took place.
    pub interaction_type: InteractionType,
    /// Inferred polarity.
    pub sentiment: Sentiment,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Clock time, `HH:MM` 24h.
    pub time: String,
    /// Free-text topics, cleaned of dates, sentiment words, and salutations.
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

/// Identifier of a persisted interaction row.
pub type RecordId = i64;

// ---------------------------------------------------------------------------
// UI actions
// ---------------------------------------------------------------------------

/// Recognised editable form fields for `UPDATE_FIELD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldName {
    /// `hcpName`
    #[serde(rename = "hcpName")]
    HcpName,
    /// `interactionType`
    #[serde(rename = "interactionType")]
    InteractionType,
    /// `date`
    #[serde(rename = "date")]
    Date,
    /// `time`
    #[serde(rename = "time")]
    Time,
    /// `sentiment`
    #[serde(rename = "sentiment")]
    Sentiment,
    /// `outcomes`
    #[serde(rename = "outcomes")]
    Outcomes,
    /// `followUpActions`
    #[serde(rename = "followUpActions")]
    FollowUpActions,
    /// `topicsDiscussed`
    #[serde(rename = "topicsDiscussed")]
    TopicsDiscussed,
}

impl FieldName {
    /// Returns the camelCase wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HcpName => "hcpName",
            Self::InteractionType => "interactionType",
            Self::Date => "date",
            Self::Time => "time",
            Self::Sentiment => "sentiment",
            Self::Outcomes => "outcomes",
            Self::FollowUpActions => "followUpActions",
            Self::TopicsDiscussed => "topicsDiscussed",
        }
    }

    /// Parse a wire field name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not in the recognised set.
    pub fn parse(s: &str) -> Result<Self, RecordError> {
        match s {
            "hcpName" => Ok(Self::HcpName),
            "interactionType" => Ok(Self::InteractionType),
            "date" => Ok(Self::Date),
            "time" => Ok(Self::Time),
            "sentiment" => Ok(Self::Sentiment),
            "outcomes" => Ok(Self::Outcomes),
            "followUpActions" => Ok(Self::FollowUpActions),
            "topicsDiscussed" => Ok(Self::TopicsDiscussed),
            other => Err(RecordError::InvalidEnum {
                field: "field",
                value: other.to_owned(),
            }),
        }
    }
}

/// A single-field correction the caller applies to its own form state.
///
/// Never persisted — corrections are client-side edits, not store mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUpdate {
    /// Which form field to update.
    pub field: FieldName,
    /// The new value, canonicalized where the field is enumerated.
    pub value: String,
}

/// Read-only profile summary computed from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HcpProfile {
    /// The HCP the profile describes.
    pub hcp_name: String,
    /// Total interactions logged for this HCP.
    pub interactions: u64,
    /// Date of the most recent logged interaction, if any.
    pub last_interaction: Option<String>,
}

/// A scheduled follow-up directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    /// Who to follow up with.
    pub hcp_name: String,
    /// Concrete follow-up date, `YYYY-MM-DD`.
    pub date: String,
    /// Purpose of the follow-up.
    pub purpose: String,
}

/// Tagged directive telling the caller how to update its displayed form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "ui_action", content = "data")]
pub enum UiAction {
    /// Populate the full interaction form from a record.
    #[serde(rename = "FILL_FORM")]
    FillForm(InteractionRecord),
    /// Apply a single-field correction to the form.
    #[serde(rename = "UPDATE_FIELD")]
    UpdateField(FieldUpdate),
    /// Display a read-only HCP lookup result.
    #[serde(rename = "HCP_PROFILE")]
    Profile(HcpProfile),
    /// Surface a scheduled follow-up.
    #[serde(rename = "SCHEDULE_FOLLOWUP")]
    ScheduleFollowup(FollowUp),
}

/// The JSON payload returned to the calling collaborator (HTTP or CLI).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The action and its variant-specific data.
    #[serde(flatten)]
    pub action: UiAction,
    /// Optional human-readable confirmation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from record-level parsing.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// An invalid enum value was read or supplied.
    #[error("invalid {field} value: {value:?}")]
    InvalidEnum {
        /// Which field contained the bad value.
        field: &'static str,
        /// The unexpected value.
        value: String,
    },
}
