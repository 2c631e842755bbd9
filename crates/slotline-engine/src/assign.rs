//! Greedy first-fit slot assignment.
//!
//! Replays the trace against per-pool slot timelines sized by the
//! inferred capacities. Instances are replayed in ascending start
//! order (stable, so equal starts keep their trace order) and each
//! takes the lowest-indexed slot of its pool that is free at its
//! start. The result reconstructs which slot every instance occupied,
//! deterministically for a given input order.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use slotline_core::{PoolCapacities, PoolName, RunId, TaskId, TaskInstance};

use crate::error::{EngineError, EngineResult};

/// One instance pinned to a concrete slot of its pool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotAssignment {
    pub task_id: TaskId,
    pub map_index: i64,
    pub pool: PoolName,
    /// Zero-based slot within the pool, always below the pool's capacity.
    pub slot_index: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub run_id: Option<RunId>,
}

/// Full assignment for one trace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotPlan {
    /// One entry per instance, in replay order (ascending start).
    pub assignments: Vec<SlotAssignment>,
    /// Highest occupied slot index plus one, per pool. Weighted pools
    /// can use fewer slots than their slot-unit capacity.
    pub slots_used: BTreeMap<PoolName, u32>,
}

/// Pack every instance into a slot of its pool.
///
/// Fails with [`EngineError::CapacityExceeded`] when no slot of the
/// instance's pool is free at its start. With capacities inferred from
/// the same instance list that cannot happen; it indicates the
/// capacity map and the trace went out of sync.
pub fn assign_slots(
    instances: &[TaskInstance],
    capacities: &PoolCapacities,
) -> EngineResult<SlotPlan> {
    let mut replay: Vec<&TaskInstance> = instances.iter().collect();
    replay.sort_by_key(|instance| instance.start);

    // Slot i holds the time it next becomes free; None means never occupied.
    let mut timelines: BTreeMap<&str, Vec<Option<DateTime<Utc>>>> = BTreeMap::new();
    let mut slots_used: BTreeMap<PoolName, u32> = BTreeMap::new();
    let mut assignments = Vec::with_capacity(instances.len());

    for instance in replay {
        let capacity = capacities.get(&instance.pool).copied().unwrap_or(0);
        let timeline = timelines
            .entry(instance.pool.as_str())
            .or_insert_with(|| vec![None; capacity as usize]);

        let slot_index = timeline
            .iter()
            .position(|next_free| next_free.is_none_or(|at| at <= instance.start))
            .ok_or_else(|| EngineError::CapacityExceeded {
                pool: instance.pool.clone(),
                task_id: instance.task_id.clone(),
                start: instance.start,
                capacity,
            })?;

        timeline[slot_index] = Some(instance.end);
        let slot_index = slot_index as u32;

        let used = slots_used.entry(instance.pool.clone()).or_insert(0);
        *used = (*used).max(slot_index + 1);

        assignments.push(SlotAssignment {
            task_id: instance.task_id.clone(),
            map_index: instance.map_index,
            pool: instance.pool.clone(),
            slot_index,
            start: instance.start,
            end: instance.end,
            run_id: instance.run_id.clone(),
        });
    }

    debug!(instances = assignments.len(), pools = slots_used.len(), "slots assigned");
    Ok(SlotPlan { assignments, slots_used })
}
