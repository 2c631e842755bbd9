pub mod config;
pub mod types;

pub use config::SlotlineConfig;
pub use types::*;
