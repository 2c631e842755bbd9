//! slotline-airflow: trace retrieval from the Airflow REST API.
//!
//! The orchestrator is the system of record for what actually ran;
//! this crate only fetches and validates its task-instance exports.
//! Everything downstream of the fetch is synchronous and lives in
//! `slotline-engine`.

pub mod client;
pub mod error;

pub use client::AirflowClient;
pub use error::{ClientError, ClientResult};
