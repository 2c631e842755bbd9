//! Capacity inference via a sweep over start/stop events.
//!
//! Pools in the source orchestrator have a fixed size, but that size is
//! not part of the trace export. The peak concurrent slot-unit demand
//! observed across the whole trace is the tightest capacity consistent
//! with what actually ran, and is what the slot assigner sizes its
//! timelines from.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use slotline_core::{PoolCapacities, PoolName, TaskInstance};

use crate::error::{EngineError, EngineResult};

/// Stop orders before Start so a slot released at T is usable at T.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    Stop,
    Start,
}

struct Event<'a> {
    at: DateTime<Utc>,
    kind: EventKind,
    pool: &'a str,
    weight: u32,
}

/// Infer per-pool capacity as the peak concurrent slot-unit demand.
///
/// Sweeps the 2N start/stop events in timestamp order, releasing before
/// acquiring at equal instants so back-to-back intervals need one slot,
/// not two. A pool's capacity is floored at its slot weight, which
/// covers instant intervals (`[t, t)`) that no sweep point observes.
///
/// Fails with [`EngineError::InconsistentPoolWeight`] when instances of
/// one pool disagree on `pool_slots`.
pub fn infer_capacities(instances: &[TaskInstance]) -> EngineResult<PoolCapacities> {
    let weights = validate_pool_weights(instances)?;

    let mut events = Vec::with_capacity(instances.len() * 2);
    for instance in instances {
        let pool = instance.pool.as_str();
        let weight = instance.pool_slots;
        events.push(Event { at: instance.start, kind: EventKind::Start, pool, weight });
        events.push(Event { at: instance.end, kind: EventKind::Stop, pool, weight });
    }
    events.sort_by_key(|event| (event.at, event.kind));

    let mut running: BTreeMap<&str, i64> = BTreeMap::new();
    let mut peaks: BTreeMap<&str, i64> = BTreeMap::new();
    for event in &events {
        let counter = running.entry(event.pool).or_insert(0);
        match event.kind {
            EventKind::Start => *counter += i64::from(event.weight),
            EventKind::Stop => *counter -= i64::from(event.weight),
        }
        let peak = peaks.entry(event.pool).or_insert(0);
        *peak = (*peak).max(*counter);
    }

    let capacities: PoolCapacities = weights
        .into_iter()
        .map(|(pool, weight)| {
            let peak = peaks.get(pool.as_str()).copied().unwrap_or(0);
            let capacity = peak.max(i64::from(weight)).min(i64::from(u32::MAX)) as u32;
            (pool, capacity)
        })
        .collect();

    debug!(pools = capacities.len(), events = events.len(), "capacities inferred");
    Ok(capacities)
}

/// Check that every pool reports a single `pool_slots` value and return
/// the pool-to-weight mapping.
fn validate_pool_weights(instances: &[TaskInstance]) -> EngineResult<BTreeMap<PoolName, u32>> {
    let mut weights: BTreeMap<PoolName, u32> = BTreeMap::new();
    for instance in instances {
        match weights.get(&instance.pool) {
            Some(&weight) if weight != instance.pool_slots => {
                return Err(EngineError::InconsistentPoolWeight {
                    pool: instance.pool.clone(),
                    first: weight,
                    second: instance.pool_slots,
                });
            }
            Some(_) => {}
            None => {
                weights.insert(instance.pool.clone(), instance.pool_slots);
            }
        }
    }
    Ok(weights)
}
