//! Engine error types.
//!
//! Every variant is fatal for the derivation that raised it. The engine
//! never emits a partial timeline: callers get the full row set or an
//! error describing the inconsistency in the trace.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias for derivation operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while deriving a timeline from a trace.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("pool {pool}: instances disagree on pool_slots ({first} vs {second})")]
    InconsistentPoolWeight { pool: String, first: u32, second: u32 },

    #[error("pool {pool}: no free slot for {task_id} at {start} (capacity {capacity})")]
    CapacityExceeded { pool: String, task_id: String, start: DateTime<Utc>, capacity: u32 },
}
