//! End-to-end derivation facade.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use slotline_core::{PoolAliases, PoolCapacities, PoolName, TaskInstance, TimelineRow};

use crate::assign::assign_slots;
use crate::capacity::infer_capacities;
use crate::error::EngineResult;
use crate::timeline::normalize;

/// Derived timeline plus the pool-level figures behind it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Timeline {
    pub rows: Vec<TimelineRow>,
    /// Peak slot-unit demand per pool.
    pub capacities: PoolCapacities,
    /// Distinct slots occupied per pool.
    pub slots_used: BTreeMap<PoolName, u32>,
}

/// Run the full derivation: infer capacities, pack slots, normalize.
///
/// Capacity inference completes before any slot is assigned, since the
/// per-pool slot arrays are sized from its result. No state survives
/// the call: the same instance list in the same order always yields
/// the same timeline.
pub fn derive_timeline(
    instances: &[TaskInstance],
    aliases: &PoolAliases,
) -> EngineResult<Timeline> {
    let capacities = infer_capacities(instances)?;
    let plan = assign_slots(instances, &capacities)?;
    let rows = normalize(&plan, aliases);

    info!(
        instances = instances.len(),
        pools = capacities.len(),
        rows = rows.len(),
        "timeline derived"
    );

    Ok(Timeline { rows, capacities, slots_used: plan.slots_used })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + TimeDelta::seconds(secs)
    }

    fn make_instance(
        task: &str,
        map_index: i64,
        pool: &str,
        start: i64,
        end: i64,
        run_id: Option<&str>,
    ) -> TaskInstance {
        TaskInstance {
            task_id: task.to_string(),
            map_index,
            pool: pool.to_string(),
            pool_slots: 1,
            start: at(start),
            end: at(end),
            run_id: run_id.map(str::to_string),
        }
    }

    #[test]
    fn derives_rows_for_every_instance() {
        let instances = vec![
            make_instance("prepare_receptor", -1, "default", 0, 30, None),
            make_instance("dock_ligand", 0, "gpu_pool", 30, 90, None),
            make_instance("dock_ligand", 1, "gpu_pool", 30, 80, None),
            make_instance("collect_scores", -1, "default", 90, 100, None),
        ];
        let timeline = derive_timeline(&instances, &PoolAliases::new()).unwrap();

        assert_eq!(timeline.rows.len(), 4);
        assert_eq!(timeline.capacities.get("gpu_pool"), Some(&2));
        assert_eq!(timeline.capacities.get("default"), Some(&1));
        assert_eq!(timeline.rows[0].start_secs, 0.0);
    }

    #[test]
    fn multi_run_instances_share_one_origin() {
        let instances = vec![
            make_instance("dock_ligand", 0, "gpu_pool", 0, 60, Some("run-a")),
            make_instance("dock_ligand", 0, "gpu_pool", 3600, 3660, Some("run-b")),
        ];
        let timeline = derive_timeline(&instances, &PoolAliases::new()).unwrap();

        assert_eq!(timeline.rows[0].run_id.as_deref(), Some("run-a"));
        assert_eq!(timeline.rows[1].run_id.as_deref(), Some("run-b"));
        assert_eq!(timeline.rows[1].start_secs, 3600.0);
    }

    #[test]
    fn rerun_is_byte_identical() {
        let instances = vec![
            make_instance("dock_ligand", 2, "gpu_pool", 5, 50, None),
            make_instance("dock_ligand", 0, "gpu_pool", 0, 40, None),
            make_instance("dock_ligand", 1, "gpu_pool", 0, 30, None),
        ];
        let mut aliases = PoolAliases::new();
        aliases.insert("gpu_pool".to_string(), "gpu".to_string());

        let first = serde_json::to_string(&derive_timeline(&instances, &aliases).unwrap()).unwrap();
        let second = serde_json::to_string(&derive_timeline(&instances, &aliases).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
