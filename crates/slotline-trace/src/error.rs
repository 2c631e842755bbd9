//! Trace loading error types.
//!
//! A trace is loaded whole or not at all: the first malformed record
//! aborts the load, and no partial instance list is ever returned.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias for trace loading operations.
pub type TraceResult<T> = Result<T, TraceError>;

/// Errors that can occur while parsing and validating a trace payload.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to parse trace payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("record {index}: {source}")]
    Record { index: usize, source: serde_json::Error },

    #[error("record {index} ({task_id}): missing {field}")]
    MissingField { index: usize, task_id: String, field: &'static str },

    #[error("record {index} ({task_id}): invalid {field} timestamp {value:?}")]
    Timestamp { index: usize, task_id: String, field: &'static str, value: String },

    #[error("record {index} ({task_id}): pool_slots must be at least 1, got {value}")]
    PoolSlots { index: usize, task_id: String, value: i64 },

    #[error("record {index} ({task_id}): end {end} precedes start {start}")]
    InvertedInterval { index: usize, task_id: String, start: DateTime<Utc>, end: DateTime<Utc> },
}
