use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord)]
pub enum Phase {
    Starting,
    Streaming,
    Stopping,
    Terminated,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Starting => "starting",
            Self::Streaming => "streaming",
            Self::Stopping => "stopping",
            Self::Terminated => "terminated",
        })
    }
}

/// Forward-only phase tracker.
#[derive(Debug)]
pub struct Lifecycle {
    phase: Phase,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        tracing::info!(phase = %Phase::Starting, "pipeline phase");
        Self {
            phase: Phase::Starting,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Move to `next`. Returns false, and stays put, if `next` is not later
    /// than the current phase.
    pub fn advance(&mut self, next: Phase) -> bool {
        if next <= self.phase {
            return false;
        }
        tracing::info!(from = %self.phase, phase = %next, "pipeline phase");
        self.phase = next;
        true
    }
}
