//! Fault-triggered diagnostic snapshots.
//!
//! At most one capture runs at a time. Requests that arrive while one is in
//! flight are dropped, not queued. Captures run as detached tasks so the
//! stream loop never waits on them.

mod error;
mod naming;
mod state;
mod trigger;

#[cfg(test)]
mod tests;

pub use error::CaptureError;
pub use naming::{ARTIFACT_TIMESTAMP_FORMAT, MAX_REASON_LEN, artifact_name, sanitize_reason};
pub use state::{CaptureState, CaptureStatus, Refusal};
pub use trigger::{SnapshotSettings, SnapshotTask, SnapshotTrigger};
