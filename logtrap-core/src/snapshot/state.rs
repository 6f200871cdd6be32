use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Inner {
    enabled: bool,
    in_flight: bool,
    last_completed: Option<Instant>,
    completed: u64,
    failed: u64,
}

/// Why a snapshot request was not started.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Refusal {
    Disabled,
    InFlight,
}

/// Point-in-time copy of [`CaptureState`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CaptureStatus {
    pub enabled: bool,
    pub in_flight: bool,
    pub last_completed: Option<Instant>,
    pub completed: u64,
    pub failed: u64,
}

/// Capture flags shared by the stream loop, capture tasks and the control
/// channel. One mutex guards all of them.
#[derive(Debug, Clone)]
pub struct CaptureState {
    inner: Arc<Mutex<Inner>>,
}

impl CaptureState {
    pub fn new(enabled: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                enabled,
                in_flight: false,
                last_completed: None,
                completed: 0,
                failed: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_enabled(&self) -> bool {
        self.lock().enabled
    }

    /// Returns the previous value.
    pub fn set_enabled(&self, enabled: bool) -> bool {
        std::mem::replace(&mut self.lock().enabled, enabled)
    }

    /// Returns the new value.
    pub fn toggle(&self) -> bool {
        let mut inner = self.lock();
        inner.enabled = !inner.enabled;
        inner.enabled
    }

    pub fn is_in_flight(&self) -> bool {
        self.lock().in_flight
    }

    pub fn status(&self) -> CaptureStatus {
        let inner = self.lock();
        CaptureStatus {
            enabled: inner.enabled,
            in_flight: inner.in_flight,
            last_completed: inner.last_completed,
            completed: inner.completed,
            failed: inner.failed,
        }
    }

    /// True if no capture has completed yet or the last one finished at least
    /// `cooldown` ago. Failed captures do not count.
    pub fn cooldown_elapsed(&self, cooldown: Duration) -> bool {
        self.lock()
            .last_completed
            .is_none_or(|t| t.elapsed() >= cooldown)
    }

    /// Claim the in-flight slot.
    pub fn try_begin(&self) -> Result<(), Refusal> {
        let mut inner = self.lock();
        if !inner.enabled {
            return Err(Refusal::Disabled);
        }
        if inner.in_flight {
            return Err(Refusal::InFlight);
        }
        inner.in_flight = true;
        Ok(())
    }

    /// Release the in-flight slot. Only a successful capture restarts the
    /// cooldown window.
    pub fn finish(&self, success: bool) {
        let mut inner = self.lock();
        inner.in_flight = false;
        if success {
            inner.last_completed = Some(Instant::now());
            inner.completed += 1;
        } else {
            inner.failed += 1;
        }
    }
}
