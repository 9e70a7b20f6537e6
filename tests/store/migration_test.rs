//! Tests for `migrations/001_schema.sql` applying cleanly.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

async fn fresh_pool() -> SqlitePool {
    let opts = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);
    // In-memory databases are per-connection, so limit to 1 connection
    // to ensure the schema and queries share the same database.
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await
        .expect("in-memory pool should connect")
}

#[tokio::test]
async fn schema_applies_cleanly() {
    let pool = fresh_pool().await;
    sqlx::raw_sql(include_str!("../../migrations/001_schema.sql"))
        .execute(&pool)
        .await
        .expect("schema should apply");

    let row: (i64,) = sqlx::query_as("SELECT count(*) FROM interactions")
        .fetch_one(&pool)
        .await
        .expect("table should exist");
    assert_eq!(row.0, 0);
}

#[tokio::test]
async fn schema_is_idempotent() {
    let pool = fresh_pool().await;
    let schema = include_str!("../../migrations/001_schema.sql");
    sqlx::raw_sql(schema)
        .execute(&pool)
        .await
        .expect("first apply should succeed");
    sqlx::raw_sql(schema)
        .execute(&pool)
        .await
        .expect("second apply should succeed");
}
