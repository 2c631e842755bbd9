//! Timeline normalization.
//!
//! Turns absolute slot assignments into renderer-ready rows: the time
//! axis is rebased so the batch's earliest start becomes 0.0 seconds,
//! pools are renamed through the display-alias table, and the mapped
//! batch position is formatted per the output contract.

use chrono::{DateTime, Utc};

use slotline_core::{PoolAliases, TimelineRow, UNMAPPED_INDEX};

use crate::assign::SlotPlan;

/// Render a slot plan as zero-origin timeline rows.
///
/// Rows keep the plan's replay order. Pools absent from `aliases` keep
/// their own name; instances with `map_index == -1` get no batch index.
pub fn normalize(plan: &SlotPlan, aliases: &PoolAliases) -> Vec<TimelineRow> {
    let Some(origin) = plan.assignments.iter().map(|a| a.start).min() else {
        return Vec::new();
    };

    plan.assignments
        .iter()
        .map(|assignment| {
            let alias = aliases
                .get(&assignment.pool)
                .map(String::as_str)
                .unwrap_or(assignment.pool.as_str());
            let batch_index = (assignment.map_index != UNMAPPED_INDEX)
                .then(|| assignment.map_index.to_string());

            TimelineRow {
                task: assignment.task_id.clone(),
                batch_index,
                resource: format!("{alias}.{}", assignment.slot_index),
                start_secs: secs_since(origin, assignment.start),
                end_secs: secs_since(origin, assignment.end),
                run_id: assignment.run_id.clone(),
            }
        })
        .collect()
}

/// Seconds from `origin` to `at`, sub-second precision preserved.
fn secs_since(origin: DateTime<Utc>, at: DateTime<Utc>) -> f64 {
    let delta = at - origin;
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1_000_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::SlotAssignment;
    use chrono::{TimeDelta, TimeZone};
    use std::collections::BTreeMap;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + TimeDelta::milliseconds(millis)
    }

    fn make_assignment(task: &str, map_index: i64, slot: u32, start_ms: i64, end_ms: i64) -> SlotAssignment {
        SlotAssignment {
            task_id: task.to_string(),
            map_index,
            pool: "gpu_pool".to_string(),
            slot_index: slot,
            start: at(start_ms),
            end: at(end_ms),
            run_id: None,
        }
    }

    fn make_plan(assignments: Vec<SlotAssignment>) -> SlotPlan {
        SlotPlan { assignments, slots_used: BTreeMap::new() }
    }

    #[test]
    fn rebases_to_earliest_start() {
        let plan = make_plan(vec![
            make_assignment("a", -1, 0, 10_000, 20_000),
            make_assignment("b", -1, 1, 12_500, 22_000),
        ]);
        let rows = normalize(&plan, &PoolAliases::new());
        assert_eq!(rows[0].start_secs, 0.0);
        assert_eq!(rows[0].end_secs, 10.0);
        assert_eq!(rows[1].start_secs, 2.5);
    }

    #[test]
    fn alias_applies_and_falls_back() {
        let mut aliases = PoolAliases::new();
        aliases.insert("gpu_pool".to_string(), "gpu".to_string());
        let plan = make_plan(vec![make_assignment("a", -1, 2, 0, 1_000)]);

        let rows = normalize(&plan, &aliases);
        assert_eq!(rows[0].resource, "gpu.2");

        let rows = normalize(&plan, &PoolAliases::new());
        assert_eq!(rows[0].resource, "gpu_pool.2");
    }

    #[test]
    fn mapped_task_renders_batch_index() {
        let plan = make_plan(vec![make_assignment("dock", 3, 0, 0, 1_000)]);
        let rows = normalize(&plan, &PoolAliases::new());
        assert_eq!(rows[0].batch_index.as_deref(), Some("3"));
    }

    #[test]
    fn singleton_omits_batch_index() {
        let plan = make_plan(vec![make_assignment("prep", -1, 0, 0, 1_000)]);
        let rows = normalize(&plan, &PoolAliases::new());
        assert!(rows[0].batch_index.is_none());
    }

    #[test]
    fn map_index_zero_still_renders() {
        let plan = make_plan(vec![make_assignment("dock", 0, 0, 0, 1_000)]);
        let rows = normalize(&plan, &PoolAliases::new());
        assert_eq!(rows[0].batch_index.as_deref(), Some("0"));
    }

    #[test]
    fn empty_plan_yields_no_rows() {
        let rows = normalize(&make_plan(Vec::new()), &PoolAliases::new());
        assert!(rows.is_empty());
    }

    #[test]
    fn run_id_carries_through() {
        let mut assignment = make_assignment("dock", -1, 0, 0, 1_000);
        assignment.run_id = Some("manual__2024-03-01T09:00:00".to_string());
        let rows = normalize(&make_plan(vec![assignment]), &PoolAliases::new());
        assert_eq!(rows[0].run_id.as_deref(), Some("manual__2024-03-01T09:00:00"));
    }
}
