//! The deterministic extraction-and-persist pipeline.
//!
//! Raw utterance → field extractors → candidate → reconciliation →
//! assembled record → append to store → `FILL_FORM` response.
//!
//! This is the rule-based path that must produce a well-formed record
//! without any model call. It is total: no extractor error escapes the
//! pipeline boundary, and a storage failure is logged and swallowed — the
//! caller still receives the assembled record (at-most-once durability,
//! no retries).

use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::assemble::{self, Candidate};
use crate::extract;
use crate::record::{ChatResponse, UiAction};
use crate::store::InteractionStore;

/// Rule-based record-creation pipeline over a shared store.
#[derive(Debug, Clone)]
pub struct Pipeline {
    store: Arc<InteractionStore>,
}

impl Pipeline {
    /// Create a pipeline over the given store.
    pub fn new(store: Arc<InteractionStore>) -> Self {
        Self { store }
    }

    /// Extract, reconcile, persist, and return a `FILL_FORM` response.
    ///
    /// Each call is synchronous and stateless apart from the shared store;
    /// concurrent callers may append concurrently.
    pub async fn handle(&self, text: &str) -> ChatResponse {
        self.handle_at(text, Local::now()).await
    }

    /// [`handle`](Self::handle) with a pinned clock.
    pub async fn handle_at(&self, text: &str, now: DateTime<Local>) -> ChatResponse {
        // One clock per request: the extractor's no-match date and the
        // reconciled date/time come from the same `now`.
        let candidate = extract::extract_candidate_on(text, now.date_naive());
        debug!(hcp = %candidate.hcp_name, "extracted candidate record");

        let record = assemble::fill_form(Candidate::from(candidate), now);

        match self.store.append(&record).await {
            Ok(id) => debug!(id, "interaction persisted"),
            // Swallowed: the caller still gets the assembled record,
            // unpersisted. At-most-once, no retry.
            Err(err) => warn!(error = %err, "interaction append failed"),
        }

        let message = if record.hcp_name.is_empty() {
            "Logged interaction".to_owned()
        } else {
            format!("Logged interaction with {}", record.hcp_name)
        };

        ChatResponse {
            action: UiAction::FillForm(record),
            message: Some(message),
        }
    }

    /// The shared store this pipeline appends to.
    pub fn store(&self) -> &Arc<InteractionStore> {
        &self.store
    }
}
