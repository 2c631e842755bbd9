//! Airflow stable REST API client.
//!
//! Talks to `GET {base_url}/dags/{dag_id}/dagRuns/{run_id}/taskInstances`
//! and walks the `limit`/`offset` pagination until `total_entries`
//! records have been collected. Deployments behind a web login are
//! handled by forwarding the UI's `session` cookie.

use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::debug;

use slotline_core::TaskInstance;
use slotline_trace::{TaskInstancePage, validate_records};

use crate::error::{ClientError, ClientResult};

/// Records requested per page; the server caps pages at this size.
const PAGE_LIMIT: u64 = 100;

pub struct AirflowClient {
    http: reqwest::Client,
    base_url: String,
}

impl AirflowClient {
    /// Build a client for an API root such as `http://localhost:8080/api/v1`.
    pub fn new(base_url: &str, session_cookie: Option<&str>) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(cookie) = session_cookie {
            let value = HeaderValue::from_str(&format!("session={cookie}"))
                .map_err(|_| ClientError::SessionCookie)?;
            headers.insert(header::COOKIE, value);
        }

        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// Fetch every task-instance record of one run, across all pages.
    pub async fn task_instances(
        &self,
        dag_id: &str,
        run_id: &str,
    ) -> ClientResult<Vec<serde_json::Value>> {
        let url = self.run_url(dag_id, run_id);
        let mut records = Vec::new();
        let mut offset = 0u64;

        loop {
            let page: TaskInstancePage = self
                .http
                .get(&url)
                .query(&[("limit", PAGE_LIMIT), ("offset", offset)])
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            let fetched = page.task_instances.len();
            records.extend(page.task_instances);
            offset += fetched as u64;

            if fetched == 0 || page_complete(page.total_entries, fetched, offset) {
                break;
            }
        }

        debug!(dag = dag_id, run = run_id, records = records.len(), "task instances fetched");
        Ok(records)
    }

    /// Fetch one run and validate it into typed instances, each stamped
    /// with `run_id`.
    pub async fn fetch_run(&self, dag_id: &str, run_id: &str) -> ClientResult<Vec<TaskInstance>> {
        let records = self.task_instances(dag_id, run_id).await?;
        Ok(validate_records(&records, Some(run_id))?)
    }

    /// Fetch several runs and concatenate their instances in the order
    /// the run ids were given.
    pub async fn fetch_runs(
        &self,
        dag_id: &str,
        run_ids: &[String],
    ) -> ClientResult<Vec<TaskInstance>> {
        let mut instances = Vec::new();
        for run_id in run_ids {
            instances.extend(self.fetch_run(dag_id, run_id).await?);
        }
        Ok(instances)
    }

    fn run_url(&self, dag_id: &str, run_id: &str) -> String {
        format!("{}/dags/{dag_id}/dagRuns/{run_id}/taskInstances", self.base_url)
    }
}

/// Whether pagination can stop after a page of `fetched` records.
///
/// Servers that ignore pagination report `total_entries` equal to the
/// first page's size, which stops the walk after one round trip.
fn page_complete(total_entries: Option<u64>, fetched: usize, offset: u64) -> bool {
    match total_entries {
        Some(total) => offset >= total,
        None => (fetched as u64) < PAGE_LIMIT,
    }
}
