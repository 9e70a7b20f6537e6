//! Append-only interaction store backed by SQLite.
//!
//! The [`InteractionStore`] is the sole gateway to the interactions table.
//! No update or delete operations exist at this layer — corrections are
//! application-level `UPDATE_FIELD` edits applied to client form state,
//! never store mutations. Each append acquires a connection from the pool
//! for just that call, so concurrent callers are serialized by SQLite
//! itself rather than by shared cursor state.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use tracing::{info, trace};

use crate::record::{InteractionRecord, InteractionType, RecordId, Sentiment};

/// Errors from interaction store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Join a sequence field into its single TEXT column form.
///
/// A lossy but accepted simplification: read-back order is preserved, but
/// elements containing the delimiter would not round-trip.
fn join_list(items: &[String]) -> String {
    items.join(", ")
}

/// Split a TEXT column back into its sequence form, preserving order.
fn split_list(column: &str) -> Vec<String> {
    if column.is_empty() {
        return Vec::new();
    }
    column.split(", ").map(str::to_owned).collect()
}

/// Append-only persistence for finalized interaction records.
#[derive(Debug, Clone)]
pub struct InteractionStore {
    db: SqlitePool,
}

impl InteractionStore {
    /// Create a store on an existing pool and apply the schema.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the schema cannot be applied.
    pub async fn new(db: SqlitePool) -> Result<Self, StoreError> {
        sqlx::raw_sql(include_str!("../../migrations/001_schema.sql"))
            .execute(&db)
            .await?;
        info!("interaction store initialised");
        Ok(Self { db })
    }

    /// Open (creating if missing) a file-backed store at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the database cannot be opened
    /// or the schema cannot be applied.
    pub async fn open(path: &str) -> Result<Self, StoreError> {
        let opts = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(opts).await?;
        Self::new(pool).await
    }

    /// Append a finalized record, returning its row id.
    ///
    /// Append-only and deliberately without dedup: appending the same
    /// record twice creates two distinct rows.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on write failure. The pipeline
    /// layer logs and swallows this — at-most-once durability is the
    /// contract, not a defect.
    pub async fn append(&self, record: &InteractionRecord) -> Result<RecordId, StoreError> {
        let result = sqlx::query(
            "INSERT INTO interactions \
             (hcp_name, interaction_type, sentiment, date, time, topics_discussed, \
              attendees, materials_shared, samples_distributed, outcomes, follow_up_actions) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .bind(&record.hcp_name)
        .bind(record.interaction_type.as_str())
        .bind(record.sentiment.as_str())
        .bind(&record.date)
        .bind(&record.time)
        .bind(&record.topics_discussed)
        .bind(join_list(&record.attendees))
        .bind(join_list(&record.materials_shared))
        .bind(join_list(&record.samples_distributed))
        .bind(&record.outcomes)
        .bind(&record.follow_up_actions)
        .execute(&self.db)
        .await?;

        let id = result.last_insert_rowid();
        trace!(id, hcp = %record.hcp_name, "interaction appended");
        Ok(id)
    }

    /// Fetch the most recently appended records, newest first.
    pub async fn recent(&self, limit: usize) -> Result<Vec<InteractionRecord>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query(
            "SELECT hcp_name, interaction_type, sentiment, date, time, topics_discussed, \
             attendees, materials_shared, samples_distributed, outcomes, follow_up_actions \
             FROM interactions ORDER BY id DESC LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        rows.iter().map(row_to_record).collect()
    }

    /// Fetch records for one HCP, newest first.
    pub async fn find_by_hcp(
        &self,
        hcp_name: &str,
        limit: usize,
    ) -> Result<Vec<InteractionRecord>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query(
            "SELECT hcp_name, interaction_type, sentiment, date, time, topics_discussed, \
             attendees, materials_shared, samples_distributed, outcomes, follow_up_actions \
             FROM interactions WHERE hcp_name = ?1 ORDER BY id DESC LIMIT ?2",
        )
        .bind(hcp_name)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        rows.iter().map(row_to_record).collect()
    }

    /// Count logged interactions for one HCP.
    pub async fn count_by_hcp(&self, hcp_name: &str) -> Result<u64, StoreError> {
        let row: (i64,) = sqlx::query_as("SELECT count(*) FROM interactions WHERE hcp_name = ?1")
            .bind(hcp_name)
            .fetch_one(&self.db)
            .await?;
        // count(*) is always non-negative, safe to cast.
        Ok(row.0.cast_unsigned())
    }

    /// Returns a reference to the underlying SQLite pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }
}

fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<InteractionRecord, StoreError> {
    let sentiment_raw: String = row.try_get("sentiment")?;
    let kind_raw: String = row.try_get("interaction_type")?;
    let attendees: String = row.try_get("attendees")?;
    let materials: String = row.try_get("materials_shared")?;
    let samples: String = row.try_get("samples_distributed")?;
    Ok(InteractionRecord {
        hcp_name: row.try_get("hcp_name")?,
        interaction_type: InteractionType::parse(&kind_raw).unwrap_or_default(),
        sentiment: Sentiment::parse(&sentiment_raw).unwrap_or_default(),
        date: row.try_get("date")?,
        time: row.try_get("time")?,
        topics_discussed: row.try_get("topics_discussed")?,
        attendees: split_list(&attendees),
        materials_shared: split_list(&materials),
        samples_distributed: split_list(&samples),
        outcomes: row.try_get("outcomes")?,
        follow_up_actions: row.try_get("follow_up_actions")?,
    })
}
