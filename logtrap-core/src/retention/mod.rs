//! Age-based cleanup of rotated logs and snapshot archives.

mod sweep;


pub use sweep::{RetentionPolicy, SweepReport, is_sweepable, run_sweeper, sweep};

use std::time::Duration;

pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(300);
