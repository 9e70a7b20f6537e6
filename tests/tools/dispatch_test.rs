//! Tests for `src/tools/mod.rs` — tool definitions and dispatch.

use chrono::{DateTime, Local, TimeZone};
use serde_json::json;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use hcplog::record::UiAction;
use hcplog::store::InteractionStore;
use hcplog::tools::{definitions, dispatch, ToolError};

async fn setup_store() -> InteractionStore {
    let opts = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await
        .expect("pool should connect");
    InteractionStore::new(pool)
        .await
        .expect("store should initialise")
}

fn pinned_now() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 8, 30, 14, 45, 0)
        .single()
        .expect("unambiguous local time")
}

#[test]
fn all_four_tools_are_advertised() {
    let names: Vec<String> = definitions().into_iter().map(|d| d.name).collect();
    assert_eq!(
        names,
        vec![
            "log_interaction",
            "edit_interaction",
            "get_hcp_profile",
            "schedule_follow_up"
        ]
    );
}

#[tokio::test]
async fn log_interaction_reconciles_empty_date_and_time() {
    let store = setup_store().await;
    let input = json!({
        "hcp_name": "Dr. Smith",
        "sentiment": "positive",
        "notes": "dosage questions",
        "date": "",
        "interaction_type": "call"
    });

    let response = dispatch(&store, "log_interaction", &input, pinned_now())
        .await
        .expect("dispatch should succeed");

    let UiAction::FillForm(record) = response.action else {
        panic!("expected FILL_FORM, got {:?}", response.action);
    };
    assert_eq!(record.date, "2026-08-30");
    assert_eq!(record.time, "14:45");
    assert_eq!(
        store
            .count_by_hcp("Dr. Smith")
            .await
            .expect("count should succeed"),
        1,
        "FILL_FORM persists"
    );
}

#[tokio::test]
async fn log_interaction_replaces_hallucinated_placeholder_time() {
    let store = setup_store().await;
    let input = json!({
        "hcp_name": "Dr. Patel",
        "date": "2025-11-30",
        "time": "09:00"
    });

    let response = dispatch(&store, "log_interaction", &input, pinned_now())
        .await
        .expect("dispatch should succeed");

    let UiAction::FillForm(record) = response.action else {
        panic!("expected FILL_FORM, got {:?}", response.action);
    };
    assert_eq!(record.date, "2025-11-30", "explicit past date is kept");
    assert_eq!(record.time, "14:45", "denylisted time is replaced");
}

#[tokio::test]
async fn log_interaction_requires_hcp_name() {
    let store = setup_store().await;
    let err = dispatch(&store, "log_interaction", &json!({}), pinned_now())
        .await
        .expect_err("should reject missing hcp_name");
    assert!(matches!(err, ToolError::InvalidInput(_)));
}

#[tokio::test]
async fn edit_interaction_canonicalizes_sentiment() {
    let store = setup_store().await;
    let input = json!({ "field": "sentiment", "value": "positive" });

    let response = dispatch(&store, "edit_interaction", &input, pinned_now())
        .await
        .expect("dispatch should succeed");

    let UiAction::UpdateField(update) = response.action else {
        panic!("expected UPDATE_FIELD, got {:?}", response.action);
    };
    assert_eq!(update.value, "Positive");
}

#[tokio::test]
async fn edit_interaction_does_not_persist() {
    let store = setup_store().await;
    let input = json!({ "field": "hcpName", "value": "Dr. Patel" });

    dispatch(&store, "edit_interaction", &input, pinned_now())
        .await
        .expect("dispatch should succeed");

    assert!(
        store.recent(10).await.expect("read should succeed").is_empty(),
        "UPDATE_FIELD never touches the store"
    );
}

#[tokio::test]
async fn edit_interaction_rejects_unknown_field() {
    let store = setup_store().await;
    let input = json!({ "field": "unknown_field", "value": "x" });

    let err = dispatch(&store, "edit_interaction", &input, pinned_now())
        .await
        .expect_err("should reject unknown field");
    assert!(matches!(err, ToolError::RejectedEdit(_)));
}

#[tokio::test]
async fn unknown_tool_is_rejected() {
    let store = setup_store().await;
    let err = dispatch(&store, "drop_all_tables", &json!({}), pinned_now())
        .await
        .expect_err("should reject unknown tool");
    assert!(matches!(err, ToolError::UnknownTool(_)));
}

#[tokio::test]
async fn profile_summarizes_logged_interactions() {
    let store = setup_store().await;
    for date in ["2025-11-01", "2025-12-02"] {
        let input = json!({ "hcp_name": "Dr. Smith", "date": date, "time": "14:30" });
        dispatch(&store, "log_interaction", &input, pinned_now())
            .await
            .expect("log should succeed");
    }

    let response = dispatch(
        &store,
        "get_hcp_profile",
        &json!({ "hcp_name": "Dr. Smith" }),
        pinned_now(),
    )
    .await
    .expect("dispatch should succeed");

    let UiAction::Profile(profile) = response.action else {
        panic!("expected HCP_PROFILE, got {:?}", response.action);
    };
    assert_eq!(profile.interactions, 2);
    assert_eq!(profile.last_interaction.as_deref(), Some("2025-12-02"));
}

#[tokio::test]
async fn follow_up_defaults_to_seven_days_out() {
    let store = setup_store().await;
    let response = dispatch(
        &store,
        "schedule_follow_up",
        &json!({ "hcp_name": "Dr. Smith", "purpose": "trial kickoff" }),
        pinned_now(),
    )
    .await
    .expect("dispatch should succeed");

    let UiAction::ScheduleFollowup(follow_up) = response.action else {
        panic!("expected SCHEDULE_FOLLOWUP, got {:?}", response.action);
    };
    assert_eq!(follow_up.date, "2026-09-06");
    assert_eq!(follow_up.purpose, "trial kickoff");
}

#[tokio::test]
async fn follow_up_honours_explicit_days() {
    let store = setup_store().await;
    let response = dispatch(
        &store,
        "schedule_follow_up",
        &json!({ "hcp_name": "Dr. Patel", "days": 2 }),
        pinned_now(),
    )
    .await
    .expect("dispatch should succeed");

    let UiAction::ScheduleFollowup(follow_up) = response.action else {
        panic!("expected SCHEDULE_FOLLOWUP, got {:?}", response.action);
    };
    assert_eq!(follow_up.date, "2026-09-01");
}
