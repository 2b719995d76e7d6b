// src/lib.rs
//
// Crate root: public re-exports used by the `glm-sync` binary and tests.

pub mod calendar;
pub mod config;
pub mod constants;
pub mod s3_client;
pub mod store;
pub mod sync;

pub use calendar::{DataHour, DateError};
pub use config::SyncConfig;
pub use store::{ObjectSource, S3ObjectSource};
pub use sync::{hour_prefix, local_target_path, sync_all, sync_hour, SyncOutcome};
