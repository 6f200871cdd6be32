use crate::detect::constants::{FAULT_KEYWORDS, FAULT_TAGS};
use crate::detect::{DetectCtx, DetectError, Detection, Detector};

/// Severe entries from Bluetooth tags, GATT keywords paired with severity or
/// ANR/crash wording, and Bluetooth lines that mention a crash, fatal or assert.
pub struct FaultTagDetector;

impl FaultTagDetector {
    const REASON: &'static str = "bt-fault";
}

impl Detector for FaultTagDetector {
    fn name(&self) -> &'static str {
        "fault_tag"
    }

    fn evaluate(&self, ctx: &DetectCtx<'_>) -> Result<Detection, DetectError> {
        let record = ctx.record;
        let severe = record.level.is_some_and(|l| l.is_severe());
        let tag = record.tag.as_str();
        let tag_l = tag.to_lowercase();

        let fault_tag =
            FAULT_TAGS.contains(&tag) || tag_l.contains("bluetooth") || tag_l.starts_with("bt");
        if severe && fault_tag {
            return Ok(Detection::fire(Self::REASON));
        }

        let msg = record.message.to_lowercase();
        if FAULT_KEYWORDS.iter().any(|k| msg.contains(k))
            && (severe || msg.contains("anr") || msg.contains("crash"))
        {
            return Ok(Detection::fire(Self::REASON));
        }

        let raw = ctx.raw.to_lowercase();
        let in_domain = raw.contains("bluetooth") || raw.starts_with("bt");
        if in_domain && ["crash", "fatal", "assert"].iter().any(|k| raw.contains(k)) {
            return Ok(Detection::fire(Self::REASON));
        }

        Ok(Detection::Quiet)
    }
}
