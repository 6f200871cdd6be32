use crate::detect::constants::{CALLBACK_MARKERS, CONGESTION_MARKERS, CONGESTION_STATUS_CODES};
use crate::detect::{DetectCtx, DetectError, Detection, Detector};
use regex::Regex;

/// A GATT callback that reports congestion, either through its status code or
/// through congestion/busy wording.
pub struct CongestionDetector {
    status: Regex,
}

impl Default for CongestionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CongestionDetector {
    pub fn new() -> Self {
        Self {
            status: Regex::new(r"(?i)\bstatus\s*[:=]?\s*(0x[0-9a-f]+|\d+)\b")
                .expect("status pattern is valid"),
        }
    }

    fn status_code(&self, text: &str) -> Result<Option<u32>, DetectError> {
        let Some(caps) = self.status.captures(text) else {
            return Ok(None);
        };

        let value = &caps[1];
        let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => value.parse::<u32>(),
        };

        parsed.map(Some).map_err(|_| DetectError::StatusCode {
            value: value.to_string(),
        })
    }
}

impl Detector for CongestionDetector {
    fn name(&self) -> &'static str {
        "congestion"
    }

    fn evaluate(&self, ctx: &DetectCtx<'_>) -> Result<Detection, DetectError> {
        let mut unparsable = None;

        for text in [ctx.record.message.as_str(), ctx.raw] {
            let lower = text.to_lowercase();
            if !CALLBACK_MARKERS.iter().any(|m| lower.contains(m)) {
                continue;
            }

            match self.status_code(text) {
                Ok(Some(code)) if CONGESTION_STATUS_CODES.contains(&code) => {
                    return Ok(Detection::fire(format!("gatt-congestion-{code:#x}")));
                }
                Ok(_) => {}
                // A bad code is no code match; markers still count.
                Err(err) => unparsable = Some(err),
            }

            if CONGESTION_MARKERS.iter().any(|m| lower.contains(m)) {
                return Ok(Detection::fire("gatt-congestion"));
            }
        }

        match unparsable {
            Some(err) => Err(err),
            None => Ok(Detection::Quiet),
        }
    }
}
