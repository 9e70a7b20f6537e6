//! hcplog — a CRM backend for HCP interaction logging.
//!
//! Turns free-text rep notes into structured [`record::InteractionRecord`]s
//! via a deterministic extraction pipeline, with an optional model-backed
//! path over the same contract, and appends them to SQLite.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod logging;

pub mod assemble;
pub mod extract;
pub mod pipeline;
pub mod reconcile;
pub mod record;
pub mod store;

pub mod agent;
pub mod providers;
pub mod tools;
