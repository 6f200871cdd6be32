use crate::detect::builtin::{
    CongestionDetector, CrashDetector, FaultTagDetector, IndicationTimeoutDetector,
    KeywordDetector, NotifyRolloverDetector,
};
use crate::detect::{DetectCtx, Detection, Detector};
use std::sync::Arc;

/// One detector's request for a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Firing {
    pub detector: &'static str,
    pub reason: Option<String>,
}

/// Ordered collection of detectors.
pub struct DetectorSet {
    detectors: Vec<Arc<dyn Detector>>,
}

impl Default for DetectorSet {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectorSet {
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// The built-in detectors in evaluation order, plus a keyword detector
    /// when `keywords` is non-empty.
    pub fn builtin(keywords: &[String]) -> Self {
        let mut set = Self::new();
        set.push(Arc::new(FaultTagDetector));
        set.push(Arc::new(NotifyRolloverDetector));
        set.push(Arc::new(IndicationTimeoutDetector));
        set.push(Arc::new(CongestionDetector::new()));
        set.push(Arc::new(CrashDetector::new()));

        if let Some(keywords) = KeywordDetector::new(keywords) {
            set.push(Arc::new(keywords));
        }

        set
    }

    pub fn push(&mut self, detector: Arc<dyn Detector>) {
        self.detectors.push(detector);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Run every detector. A failing detector is logged and skipped; the rest
    /// still run.
    pub fn evaluate(&self, ctx: &DetectCtx<'_>) -> Vec<Firing> {
        let mut firings = Vec::new();

        for detector in &self.detectors {
            match detector.evaluate(ctx) {
                Ok(Detection::Quiet) => continue,
                Ok(Detection::Fire { reason }) => {
                    tracing::debug!(
                        detector = detector.name(),
                        reason = reason.as_deref().unwrap_or(""),
                        "detector fired"
                    );
                    firings.push(Firing {
                        detector: detector.name(),
                        reason,
                    });
                }
                Err(e) => {
                    tracing::warn!(detector = detector.name(), error = %e, "detector failed");
                }
            }
        }

        firings
    }
}
