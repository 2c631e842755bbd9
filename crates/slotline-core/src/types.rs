//! Domain types shared across Slotline crates.
//!
//! A run's execution trace is a flat list of [`TaskInstance`]s. The engine
//! turns that list into [`TimelineRow`]s, one per instance, each pinned to
//! a concrete pool slot. Pool-keyed maps use `BTreeMap` so iteration order
//! is stable across runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Task identifier as reported by the orchestrator (e.g. `"dock_ligand"`).
pub type TaskId = String;

/// Name of an execution pool (e.g. `"gpu_pool"`).
pub type PoolName = String;

/// Identifier of a single pipeline run (e.g. `"manual__2024-03-01T09:00:00"`).
pub type RunId = String;

/// Inferred slot-unit capacity per pool.
pub type PoolCapacities = BTreeMap<PoolName, u32>;

/// Display alias per pool. Pools without an entry keep their own name.
pub type PoolAliases = BTreeMap<PoolName, String>;

// ── Task instances ─────────────────────────────────────────────────

/// Sentinel `map_index` for tasks that are not dynamically mapped.
pub const UNMAPPED_INDEX: i64 = -1;

/// One completed task execution from a run's trace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskInstance {
    pub task_id: TaskId,
    /// Batch position for dynamically mapped tasks, [`UNMAPPED_INDEX`] otherwise.
    pub map_index: i64,
    pub pool: PoolName,
    /// Slot units this instance holds while running. At least 1.
    pub pool_slots: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Set when the trace spans multiple runs; `None` for single-run traces.
    pub run_id: Option<RunId>,
}

impl TaskInstance {
    /// Whether this instance is one batch element of a dynamically mapped task.
    pub fn is_mapped(&self) -> bool {
        self.map_index != UNMAPPED_INDEX
    }
}

// ── Timeline ───────────────────────────────────────────────────────

/// One normalized timeline entry, ready for rendering or export.
///
/// Offsets are seconds relative to the earliest start in the trace, so the
/// first row of any timeline begins at `0.0`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineRow {
    pub task: TaskId,
    /// Decimal batch position for mapped tasks; absent for singletons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_index: Option<String>,
    /// Display label `"<pool alias>.<slot index>"`.
    pub resource: String,
    pub start_secs: f64,
    pub end_secs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<RunId>,
}
