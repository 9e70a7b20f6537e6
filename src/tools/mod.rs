//! Named tools exposed to the model-backed path.
//!
//! Each tool is an async function taking typed dependencies and a JSON
//! arguments object, mirroring the argument shapes the model is shown in
//! [`definitions`]. The dispatcher routes a tool call by name. Both the
//! agent and any external tool-calling collaborator go through this one
//! surface, so every record-creation path shares the same reconciliation
//! and persistence behaviour.

use chrono::{DateTime, Days, Local};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::assemble::{self, AssembleError, Candidate};
use crate::providers::ToolDefinition;
use crate::record::{ChatResponse, FollowUp, HcpProfile, UiAction};
use crate::store::InteractionStore;

/// Default follow-up horizon when the model does not supply `days`.
const DEFAULT_FOLLOW_UP_DAYS: u64 = 7;

/// Errors from tool dispatch.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Arguments were missing or of the wrong shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The requested tool name is not registered.
    #[error("unknown tool: {0:?}")]
    UnknownTool(String),
    /// An edit targeted an unrecognised field.
    #[error(transparent)]
    RejectedEdit(#[from] AssembleError),
}

/// Tool definitions advertised to the model.
///
/// Argument shapes match the original tool contract: the model is told to
/// pass empty strings for date/time when the user means "now" — the
/// reconciliation policy fills in the server clock either way.
pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "log_interaction".to_owned(),
            description: "Log a new HCP interaction. Pass empty strings for date/time \
                          when the user means now or today."
                .to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "hcp_name": { "type": "string" },
                    "sentiment": { "type": "string", "enum": ["positive", "neutral", "negative"] },
                    "notes": { "type": "string" },
                    "date": { "type": "string" },
                    "time": { "type": "string" },
                    "interaction_type": { "type": "string", "enum": ["meeting", "call", "email"] }
                },
                "required": ["hcp_name"]
            }),
        },
        ToolDefinition {
            name: "edit_interaction".to_owned(),
            description: "Correct a single field in the form currently shown to the user."
                .to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "field": {
                        "type": "string",
                        "enum": ["hcpName", "interactionType", "date", "time", "sentiment",
                                 "outcomes", "followUpActions", "topicsDiscussed"]
                    },
                    "value": { "type": "string" }
                },
                "required": ["field", "value"]
            }),
        },
        ToolDefinition {
            name: "get_hcp_profile".to_owned(),
            description: "Look up the logged interaction history for an HCP.".to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": { "hcp_name": { "type": "string" } },
                "required": ["hcp_name"]
            }),
        },
        ToolDefinition {
            name: "schedule_follow_up".to_owned(),
            description: "Schedule a follow-up with an HCP in a given number of days \
                          (default 7)."
                .to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "hcp_name": { "type": "string" },
                    "days": { "type": "integer", "minimum": 1 },
                    "purpose": { "type": "string" }
                },
                "required": ["hcp_name"]
            }),
        },
    ]
}

/// Route a tool call by name.
///
/// # Errors
///
/// Returns [`ToolError::UnknownTool`] for unregistered names, and the
/// tool's own error otherwise.
pub async fn dispatch(
    store: &InteractionStore,
    name: &str,
    input: &Value,
    now: DateTime<Local>,
) -> Result<ChatResponse, ToolError> {
    debug!(tool = name, "dispatching tool call");
    match name {
        "log_interaction" => log_interaction(store, input, now).await,
        "edit_interaction" => edit_interaction(input),
        "get_hcp_profile" => get_hcp_profile(store, input).await,
        "schedule_follow_up" => schedule_follow_up(input, now),
        other => Err(ToolError::UnknownTool(other.to_owned())),
    }
}

fn require_str<'a>(input: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    input
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidInput(format!("missing required field: {key}")))
}

fn optional_str<'a>(input: &'a Value, key: &str) -> &'a str {
    input.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// Log a new interaction: assemble, persist, return `FILL_FORM`.
///
/// A storage failure is logged and swallowed — the assembled record is
/// still returned to the caller.
async fn log_interaction(
    store: &InteractionStore,
    input: &Value,
    now: DateTime<Local>,
) -> Result<ChatResponse, ToolError> {
    let hcp_name = require_str(input, "hcp_name")?;

    let candidate = Candidate {
        hcp_name: hcp_name.to_owned(),
        interaction_type: optional_str(input, "interaction_type").to_owned(),
        sentiment: optional_str(input, "sentiment").to_owned(),
        date: optional_str(input, "date").to_owned(),
        time: optional_str(input, "time").to_owned(),
        topics_discussed: optional_str(input, "notes").to_owned(),
        ..Candidate::default()
    };
    let record = assemble::fill_form(candidate, now);

    match store.append(&record).await {
        Ok(id) => debug!(id, "interaction persisted"),
        Err(err) => warn!(error = %err, "interaction append failed"),
    }

    let message = format!("Logged interaction with {}", record.hcp_name);
    Ok(ChatResponse {
        action: UiAction::FillForm(record),
        message: Some(message),
    })
}

/// Correct one form field client-side. Nothing is persisted.
fn edit_interaction(input: &Value) -> Result<ChatResponse, ToolError> {
    let field = require_str(input, "field")?;
    let value = require_str(input, "value")?;

    let update = assemble::update_field(field, value)?;
    let message = format!("Updated {}", update.field.as_str());
    Ok(ChatResponse {
        action: UiAction::UpdateField(update),
        message: Some(message),
    })
}

/// Read-only profile lookup computed from the store.
async fn get_hcp_profile(store: &InteractionStore, input: &Value) -> Result<ChatResponse, ToolError> {
    let hcp_name = require_str(input, "hcp_name")?;

    let interactions = store.count_by_hcp(hcp_name).await.unwrap_or_else(|err| {
        warn!(error = %err, "profile count failed");
        0
    });
    let last_interaction = match store.find_by_hcp(hcp_name, 1).await {
        Ok(records) => records.into_iter().next().map(|r| r.date),
        Err(err) => {
            warn!(error = %err, "profile lookup failed");
            None
        }
    };

    Ok(ChatResponse {
        action: UiAction::Profile(HcpProfile {
            hcp_name: hcp_name.to_owned(),
            interactions,
            last_interaction,
        }),
        message: None,
    })
}

/// Resolve a follow-up `days` offset into a concrete date.
fn schedule_follow_up(input: &Value, now: DateTime<Local>) -> Result<ChatResponse, ToolError> {
    let hcp_name = require_str(input, "hcp_name")?;
    let days = input
        .get("days")
        .and_then(Value::as_u64)
        .unwrap_or(DEFAULT_FOLLOW_UP_DAYS);
    let purpose = optional_str(input, "purpose");

    let date = now
        .date_naive()
        .checked_add_days(Days::new(days))
        .ok_or_else(|| ToolError::InvalidInput(format!("days out of range: {days}")))?;

    let follow_up = FollowUp {
        hcp_name: hcp_name.to_owned(),
        date: date.format("%Y-%m-%d").to_string(),
        purpose: purpose.to_owned(),
    };
    let message = format!("Follow-up with {} on {}", follow_up.hcp_name, follow_up.date);
    Ok(ChatResponse {
        action: UiAction::ScheduleFollowup(follow_up),
        message: Some(message),
    })
}
