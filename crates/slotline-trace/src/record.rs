//! Wire format of the orchestrator's task-instance endpoint.

use serde::Deserialize;

/// Envelope returned by `GET .../dagRuns/{run_id}/taskInstances`.
#[derive(Debug, Deserialize)]
pub struct TaskInstancePage {
    pub task_instances: Vec<serde_json::Value>,
    /// Total record count across all pages, when the server reports it.
    pub total_entries: Option<u64>,
}

/// One task-instance record as serialized by the orchestrator.
///
/// The endpoint returns far more fields than these; unknown keys are
/// ignored. Timestamps stay as strings here so validation can report
/// the offending value verbatim.
#[derive(Debug, Deserialize)]
pub struct RawTaskInstance {
    pub task_id: String,
    pub map_index: i64,
    pub pool: String,
    pub pool_slots: i64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub dag_run_id: Option<String>,
}
