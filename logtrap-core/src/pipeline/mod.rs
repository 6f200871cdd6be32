//! The stream loop: read lines, persist them, and request snapshots.
//!
//! ```text
//! Starting -> Streaming -> Stopping -> Terminated
//! ```
//!
//! [`run`] owns the whole lifecycle. [`Pipeline`] and [`run_stream`] are the
//! per-line machinery and can be driven directly from any line source.

mod error;
mod phase;
mod pid;
mod run;
mod shutdown;
mod stream;

#[cfg(test)]
mod tests;

pub use error::PipelineError;
pub use phase::{Lifecycle, Phase};
pub use pid::PidFile;
pub use run::{Cleanup, SHUTDOWN_GRACE, run, sweep_roots};
pub use shutdown::ShutdownHandle;
pub use stream::{LineOutcome, Pipeline, StreamEnd, StreamStats, run_stream};
