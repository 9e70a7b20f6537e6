//! Tests for `src/store/mod.rs` — append-only persistence.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use hcplog::record::{InteractionRecord, InteractionType, Sentiment};
use hcplog::store::InteractionStore;

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

fn sample_record() -> InteractionRecord {
    InteractionRecord {
        hcp_name: "Dr. Smith".to_owned(),
        interaction_type: InteractionType::Meeting,
        sentiment: Sentiment::Positive,
        date: "2025-12-02".to_owned(),
        time: "14:30".to_owned(),
        topics_discussed: "pricing, next trial".to_owned(),
        attendees: vec!["Nurse Lee".to_owned(), "Rep Jones".to_owned()],
        materials_shared: vec!["dosage card".to_owned()],
        samples_distributed: Vec::new(),
        outcomes: "agreed to trial".to_owned(),
        follow_up_actions: "send pricing sheet".to_owned(),
    }
}

#[tokio::test]
async fn append_round_trips_the_record() {
    let store = setup_store().await;
    let record = sample_record();

    store.append(&record).await.expect("append should succeed");

    let fetched = store.recent(1).await.expect("read-back should succeed");
    assert_eq!(fetched, vec![record]);
}

#[tokio::test]
async fn list_field_order_is_preserved_on_read_back() {
    let store = setup_store().await;
    store
        .append(&sample_record())
        .await
        .expect("append should succeed");

    let fetched = store.recent(1).await.expect("read-back should succeed");
    assert_eq!(
        fetched[0].attendees,
        vec!["Nurse Lee".to_owned(), "Rep Jones".to_owned()]
    );
}

#[tokio::test]
async fn duplicate_appends_create_distinct_rows() {
    let store = setup_store().await;
    let record = sample_record();

    let first = store.append(&record).await.expect("first append");
    let second = store.append(&record).await.expect("second append");

    assert_ne!(first, second, "each append gets its own row id");
    assert_eq!(
        store
            .count_by_hcp("Dr. Smith")
            .await
            .expect("count should succeed"),
        2
    );
}

#[tokio::test]
async fn find_by_hcp_returns_newest_first() {
    let store = setup_store().await;
    let mut older = sample_record();
    older.date = "2025-11-01".to_owned();
    store.append(&older).await.expect("append older");
    store.append(&sample_record()).await.expect("append newer");

    let records = store
        .find_by_hcp("Dr. Smith", 10)
        .await
        .expect("lookup should succeed");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].date, "2025-12-02");
    assert_eq!(records[1].date, "2025-11-01");
}

#[tokio::test]
async fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir should create");
    let db_path = dir
        .path()
        .join("interactions.db")
        .to_string_lossy()
        .into_owned();

    {
        let store = InteractionStore::open(&db_path).await.expect("open");
        store.append(&sample_record()).await.expect("append");
        store.pool().close().await;
    }

    let reopened = InteractionStore::open(&db_path).await.expect("reopen");
    assert_eq!(
        reopened
            .count_by_hcp("Dr. Smith")
            .await
            .expect("count should succeed"),
        1
    );
}
