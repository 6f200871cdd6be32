use crate::detect::constants::INDICATION_TIMEOUT_MARKERS;
use crate::detect::{DetectCtx, DetectError, Detection, Detector};

/// GATT service-changed indication was never confirmed.
pub struct IndicationTimeoutDetector;

impl Detector for IndicationTimeoutDetector {
    fn name(&self) -> &'static str {
        "indication_timeout"
    }

    fn evaluate(&self, ctx: &DetectCtx<'_>) -> Result<Detection, DetectError> {
        let msg = ctx.record.message.to_lowercase();
        let raw = ctx.raw.to_lowercase();

        let marked = INDICATION_TIMEOUT_MARKERS
            .iter()
            .any(|m| msg.contains(m) || raw.contains(m));

        let utils_timeout = raw.contains("gatt_utils.cc")
            && raw.contains("timed out")
            && raw.contains("service changed");

        if marked || utils_timeout {
            Ok(Detection::fire("gatt-indication-timeout"))
        } else {
            Ok(Detection::Quiet)
        }
    }
}
