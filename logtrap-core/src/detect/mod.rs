//! Fault detectors.
//!
//! Each detector inspects the current record (and, where it needs to, the one
//! before it) and decides whether a snapshot should be requested. Detectors are
//! independent: the set runs every one of them in a fixed order and collects
//! all firings, so several may fire for the same line.

pub mod builtin;
mod constants;
mod error;
mod set;


pub use error::DetectError;
pub use set::{DetectorSet, Firing};

use crate::record::LogRecord;

/// The record immediately preceding the one being evaluated.
#[derive(Debug, Clone, Copy)]
pub struct Lookback<'a> {
    pub record: &'a LogRecord,
    pub raw: &'a str,
}

/// Everything a detector may look at for one line.
#[derive(Debug, Clone, Copy)]
pub struct DetectCtx<'a> {
    pub record: &'a LogRecord,
    pub raw: &'a str,
    pub previous: Option<Lookback<'a>>,
    /// True when `record` starts a new minute relative to `previous`.
    pub minute_rolled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Nothing of interest.
    Quiet,

    /// Request a snapshot, optionally tagged with a human-readable reason.
    Fire { reason: Option<String> },
}

impl Detection {
    pub fn fire(reason: impl Into<String>) -> Self {
        Self::Fire {
            reason: Some(reason.into()),
        }
    }

    pub fn is_fire(&self) -> bool {
        matches!(self, Self::Fire { .. })
    }
}

/// A predicate over the log stream.
///
/// Implementations must be cheap: they run for every line while capture is
/// enabled.
pub trait Detector: Send + Sync {
    /// Stable identifier used in logs.
    fn name(&self) -> &'static str;

    fn evaluate(&self, ctx: &DetectCtx<'_>) -> Result<Detection, DetectError>;
}
