use crate::detect::{DetectCtx, DetectError, Detection, Detector, Lookback};

/// Fires at a minute boundary when the last record of the previous minute was
/// a GATT `onNotify` callback.
///
/// The record that carries `onNotify` is never itself the trigger; only the
/// first record of the following minute is.
pub struct NotifyRolloverDetector;

impl NotifyRolloverDetector {
    pub fn is_notify(previous: &Lookback<'_>) -> bool {
        let tag = previous.record.tag.to_lowercase();
        let msg = previous.record.message.to_lowercase();
        if (tag.contains("gattservice") || tag.contains("btgatt")) && msg.contains("onnotify") {
            return true;
        }

        let raw = previous.raw.to_lowercase();
        raw.contains("gattservice") && raw.contains("onnotify")
    }
}

impl Detector for NotifyRolloverDetector {
    fn name(&self) -> &'static str {
        "notify_rollover"
    }

    fn evaluate(&self, ctx: &DetectCtx<'_>) -> Result<Detection, DetectError> {
        if !ctx.minute_rolled {
            return Ok(Detection::Quiet);
        }

        match &ctx.previous {
            Some(previous) if Self::is_notify(previous) => Ok(Detection::fire("notify-rollover")),
            _ => Ok(Detection::Quiet),
        }
    }
}
