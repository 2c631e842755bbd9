//! `slotline pools`: pool capacity and slot usage summary.

use slotline_engine::{Timeline, derive_timeline};

use super::input::{gather_instances, load_config};

pub async fn pools(
    config: Option<&str>,
    runs: &[String],
    inputs: &[String],
    format: &str,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let instances = gather_instances(config.as_ref(), runs, inputs).await?;
    let aliases = config.as_ref().map(|c| c.pool_aliases()).unwrap_or_default();
    let timeline = derive_timeline(&instances, &aliases)?;

    match format {
        "json" => {
            let payload = serde_json::json!({
                "capacities": timeline.capacities,
                "slots_used": timeline.slots_used,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        _ => print!("{}", format_pools(&timeline)),
    }

    Ok(())
}

fn format_pools(timeline: &Timeline) -> String {
    let width = timeline.capacities.keys().map(String::len).max().unwrap_or(0).max(4);
    let mut out = String::new();
    out.push_str(&format!("{:<width$}  {:>8}  {:>10}\n", "POOL", "CAPACITY", "SLOTS USED"));
    for (pool, capacity) in &timeline.capacities {
        let used = timeline.slots_used.get(pool).copied().unwrap_or(0);
        out.push_str(&format!("{pool:<width$}  {capacity:>8}  {used:>10}\n"));
    }
    out
}
