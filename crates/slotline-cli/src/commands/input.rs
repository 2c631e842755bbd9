//! Shared input resolution for CLI commands.
//!
//! A trace comes either from local JSON export files or from the
//! orchestrator's API, selected by run ids on the command line or in
//! slotline.toml.

use std::path::Path;

use anyhow::{Context, bail};
use tracing::info;

use slotline_airflow::AirflowClient;
use slotline_core::{SlotlineConfig, TaskInstance};
use slotline_trace::{RunPayload, load_all};

/// Load slotline.toml. An explicit path must exist; the default path
/// is used only when the file is present.
pub fn load_config(path: Option<&str>) -> anyhow::Result<Option<SlotlineConfig>> {
    match path {
        Some(path) => {
            let config = SlotlineConfig::from_file(Path::new(path))
                .with_context(|| format!("failed to read {path}"))?;
            Ok(Some(config))
        }
        None => {
            let default = Path::new("slotline.toml");
            if default.exists() {
                Ok(Some(SlotlineConfig::from_file(default)?))
            } else {
                Ok(None)
            }
        }
    }
}

/// Resolve the task instances named by the command line.
///
/// `--input` files win over run ids; run ids on the command line win
/// over `[runs]` in the config.
pub async fn gather_instances(
    config: Option<&SlotlineConfig>,
    runs: &[String],
    inputs: &[String],
) -> anyhow::Result<Vec<TaskInstance>> {
    if !inputs.is_empty() {
        let mut payloads = Vec::with_capacity(inputs.len());
        for input in inputs {
            let body = std::fs::read_to_string(input)
                .with_context(|| format!("failed to read {input}"))?;
            payloads.push(RunPayload { run_id: None, body });
        }
        let instances = load_all(&payloads)?;
        info!(files = inputs.len(), instances = instances.len(), "trace loaded from files");
        return Ok(instances);
    }

    let Some(config) = config else {
        bail!("fetching runs requires a slotline.toml (pass --config or use --input)");
    };
    let run_ids: Vec<String> =
        if runs.is_empty() { config.run_ids().to_vec() } else { runs.to_vec() };
    if run_ids.is_empty() {
        bail!("no runs selected: pass --run or set [runs] ids in slotline.toml");
    }

    let client = AirflowClient::new(
        &config.airflow.base_url,
        config.airflow.session_cookie.as_deref(),
    )?;
    let instances = client.fetch_runs(&config.airflow.dag_id, &run_ids).await?;
    info!(
        dag = %config.airflow.dag_id,
        runs = run_ids.len(),
        instances = instances.len(),
        "trace fetched"
    );
    Ok(instances)
}
