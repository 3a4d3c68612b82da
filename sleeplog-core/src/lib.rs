//! SleepLog Core Library
//!
//! Record store, types and operations for the SleepLog bedtime tracker.
//! The CLI crate builds its menu and subcommands on top of [`SleepLog`].

pub mod chart;
pub mod error;
pub mod journal;
pub mod paths;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use chart::{BedtimePoint, BedtimeSeries};
pub use error::*;
pub use journal::SleepLog;
pub use paths::{default_config_path, default_data_dir, default_data_file};
pub use store::RecordStore;
pub use types::*;
