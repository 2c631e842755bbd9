//! slotline.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::types::{PoolAliases, RunId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotlineConfig {
    pub airflow: AirflowConfig,
    pub runs: Option<RunsConfig>,
    pub pools: Option<PoolsConfig>,
}

/// Connection settings for the orchestrator's REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirflowConfig {
    /// API root, e.g. `http://localhost:8080/api/v1`.
    pub base_url: String,
    pub dag_id: String,
    /// Value of the `session` cookie for authenticated deployments.
    pub session_cookie: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunsConfig {
    /// Run identifiers to fetch, in the order their rows should appear.
    pub ids: Vec<RunId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolsConfig {
    /// Pool name to display alias, e.g. `gpu_pool = "gpu"`.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl SlotlineConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SlotlineConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Configured pool aliases, or an empty map when `[pools]` is absent.
    pub fn pool_aliases(&self) -> PoolAliases {
        self.pools.as_ref().map(|p| p.aliases.clone()).unwrap_or_default()
    }

    /// Configured run ids, or an empty slice when `[runs]` is absent.
    pub fn run_ids(&self) -> &[RunId] {
        self.runs.as_ref().map(|r| r.ids.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let toml_str = r#"
[airflow]
base_url = "http://localhost:8080/api/v1"
dag_id = "autodock_pipeline"
"#;
        let config: SlotlineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.airflow.dag_id, "autodock_pipeline");
        assert!(config.airflow.session_cookie.is_none());
        assert!(config.pool_aliases().is_empty());
        assert!(config.run_ids().is_empty());
    }

    #[test]
    fn test_parse_full() {
        let toml_str = r#"
[airflow]
base_url = "https://airflow.example.com/api/v1"
dag_id = "autodock_pipeline"
session_cookie = "abc123"

[runs]
ids = ["manual__2024-03-01T09:00:00", "manual__2024-03-02T09:00:00"]

[pools.aliases]
gpu_pool = "gpu"
default_pool = "cpu"
"#;
        let config: SlotlineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.airflow.session_cookie.as_deref(), Some("abc123"));
        assert_eq!(config.run_ids().len(), 2);
        assert_eq!(config.pool_aliases().get("gpu_pool").map(String::as_str), Some("gpu"));
    }

    #[test]
    fn test_roundtrip() {
        let toml_str = r#"
[airflow]
base_url = "http://localhost:8080/api/v1"
dag_id = "autodock_pipeline"

[pools.aliases]
gpu_pool = "gpu"
"#;
        let config: SlotlineConfig = toml::from_str(toml_str).unwrap();
        let rendered = config.to_toml_string().unwrap();
        let reparsed: SlotlineConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(reparsed.pool_aliases(), config.pool_aliases());
    }
}
