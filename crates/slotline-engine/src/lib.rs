//! slotline-engine: trace-to-timeline derivation.
//!
//! Reconstructs how a finished pipeline run actually occupied its
//! execution pools. Pool capacities are not part of the trace export,
//! so they are inferred from the trace itself before each instance is
//! packed back into a concrete slot.
//!
//! # Data flow
//!
//! ```text
//! &[TaskInstance]
//!   ├── infer_capacities()  → peak slot-units per pool
//!   ├── assign_slots()      → SlotPlan (slot index per instance)
//!   └── normalize()         → zero-origin TimelineRow list
//! ```
//!
//! [`derive_timeline`] runs the three passes in order. All state is
//! local to one call; derivation is deterministic and idempotent for
//! a given input order.

pub mod assign;
pub mod capacity;
pub mod derive;
pub mod error;
pub mod timeline;

pub use assign::{SlotAssignment, SlotPlan, assign_slots};
pub use capacity::infer_capacities;
pub use derive::{Timeline, derive_timeline};
pub use error::{EngineError, EngineResult};
pub use timeline::normalize;
