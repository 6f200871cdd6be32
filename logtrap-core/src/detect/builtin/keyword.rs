use crate::detect::{DetectCtx, DetectError, Detection, Detector};

/// Operator-supplied keywords, matched case-insensitively against the raw line.
pub struct KeywordDetector {
    keywords: Vec<String>,
}

impl KeywordDetector {
    /// `None` when no usable keyword remains after trimming.
    pub fn new(keywords: &[String]) -> Option<Self> {
        let mut folded: Vec<String> = Vec::new();
        for k in keywords {
            let k = k.trim().to_lowercase();
            if !k.is_empty() && !folded.contains(&k) {
                folded.push(k);
            }
        }

        if folded.is_empty() {
            None
        } else {
            Some(Self { keywords: folded })
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Detector for KeywordDetector {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn evaluate(&self, ctx: &DetectCtx<'_>) -> Result<Detection, DetectError> {
        let raw = ctx.raw.to_lowercase();

        Ok(self
            .keywords
            .iter()
            .find(|k| raw.contains(k.as_str()))
            .map(|k| Detection::fire(format!("keyword-{k}")))
            .unwrap_or(Detection::Quiet))
    }
}
