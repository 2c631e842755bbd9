//! `slotline derive`: produce the renderer-ready timeline rows.

use tracing::info;

use slotline_engine::derive_timeline;

use super::input::{gather_instances, load_config};

pub async fn derive(
    config: Option<&str>,
    runs: &[String],
    inputs: &[String],
    out: Option<&str>,
    pretty: bool,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let instances = gather_instances(config.as_ref(), runs, inputs).await?;
    let aliases = config.as_ref().map(|c| c.pool_aliases()).unwrap_or_default();
    let timeline = derive_timeline(&instances, &aliases)?;

    for (pool, capacity) in &timeline.capacities {
        let used = timeline.slots_used.get(pool).copied().unwrap_or(0);
        info!(pool = %pool, capacity, slots_used = used, "pool inferred");
    }

    let json = if pretty {
        serde_json::to_string_pretty(&timeline.rows)?
    } else {
        serde_json::to_string(&timeline.rows)?
    };

    match out {
        Some(path) => {
            std::fs::write(path, &json)?;
            println!("✓ Wrote {} rows to {path}", timeline.rows.len());
        }
        None => println!("{json}"),
    }

    Ok(())
}
