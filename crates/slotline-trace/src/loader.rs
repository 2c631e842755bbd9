//! Trace payload parsing and record validation.
//!
//! Accepts either the orchestrator's response envelope or a bare JSON
//! array of records. Validation is strict and atomic: the first bad
//! record fails the whole load, identified by its position in the
//! payload so the upstream export can be inspected.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use slotline_core::{RunId, TaskInstance};

use crate::error::{TraceError, TraceResult};
use crate::record::{RawTaskInstance, TaskInstancePage};

/// One raw payload plus the run it was fetched for.
#[derive(Debug, Clone)]
pub struct RunPayload {
    /// Stamped onto every instance; takes precedence over any
    /// `dag_run_id` carried by the records themselves.
    pub run_id: Option<RunId>,
    pub body: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TracePayload {
    Page(TaskInstancePage),
    Records(Vec<serde_json::Value>),
}

/// Extract the record array from a payload body.
pub fn parse_payload(body: &str) -> TraceResult<Vec<serde_json::Value>> {
    let payload: TracePayload = serde_json::from_str(body)?;
    let records = match payload {
        TracePayload::Page(page) => page.task_instances,
        TracePayload::Records(records) => records,
    };
    Ok(records)
}

/// Validate raw records into typed instances, in payload order.
///
/// `run_id`, when given, is stamped onto every instance and overrides
/// the records' own `dag_run_id`.
pub fn validate_records(
    records: &[serde_json::Value],
    run_id: Option<&str>,
) -> TraceResult<Vec<TaskInstance>> {
    let mut instances = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let raw: RawTaskInstance = serde_json::from_value(record.clone())
            .map_err(|source| TraceError::Record { index, source })?;

        let start = parse_timestamp(index, &raw.task_id, "start_date", raw.start_date.as_deref())?;
        let end = parse_timestamp(index, &raw.task_id, "end_date", raw.end_date.as_deref())?;

        let pool_slots = u32::try_from(raw.pool_slots)
            .ok()
            .filter(|slots| *slots >= 1)
            .ok_or_else(|| TraceError::PoolSlots {
                index,
                task_id: raw.task_id.clone(),
                value: raw.pool_slots,
            })?;

        if end < start {
            return Err(TraceError::InvertedInterval { index, task_id: raw.task_id, start, end });
        }

        instances.push(TaskInstance {
            task_id: raw.task_id,
            map_index: raw.map_index,
            pool: raw.pool,
            pool_slots,
            start,
            end,
            run_id: run_id.map(str::to_string).or(raw.dag_run_id),
        });
    }

    Ok(instances)
}

/// Parse and validate a single payload body.
pub fn load_payload(body: &str, run_id: Option<&str>) -> TraceResult<Vec<TaskInstance>> {
    let records = parse_payload(body)?;
    let instances = validate_records(&records, run_id)?;
    debug!(records = instances.len(), run = run_id.unwrap_or("-"), "trace payload loaded");
    Ok(instances)
}

/// Load several payloads into a single instance list.
///
/// Payload order is preserved, so instances from earlier payloads keep
/// lower positions wherever later stages break ties by discovery order.
pub fn load_all(payloads: &[RunPayload]) -> TraceResult<Vec<TaskInstance>> {
    let mut instances = Vec::new();
    for payload in payloads {
        instances.extend(load_payload(&payload.body, payload.run_id.as_deref())?);
    }
    Ok(instances)
}

fn parse_timestamp(
    index: usize,
    task_id: &str,
    field: &'static str,
    value: Option<&str>,
) -> TraceResult<DateTime<Utc>> {
    let value = value.ok_or_else(|| TraceError::MissingField {
        index,
        task_id: task_id.to_string(),
        field,
    })?;
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| TraceError::Timestamp {
            index,
            task_id: task_id.to_string(),
            field,
            value: value.to_string(),
        })
}
