//! slotline-trace: execution trace loading for Slotline.
//!
//! Parses the JSON task-instance payloads exported by the workflow
//! orchestrator into typed [`slotline_core::TaskInstance`] lists.
//! Loading is atomic: a payload either validates completely or the
//! load fails with a record-level error.

pub mod error;
pub mod loader;
pub mod record;

pub use error::{TraceError, TraceResult};
pub use loader::{RunPayload, load_all, load_payload, parse_payload, validate_records};
pub use record::{RawTaskInstance, TaskInstancePage};
