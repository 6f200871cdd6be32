use crate::detect::{DetectCtx, DetectError, Detection, Detector};
use regex::Regex;

/// Java and native crash signatures, tagged with what crashed.
///
/// Reasons take the forms `java-crash-<thread>`, `java-crash-<thread>-<package>`
/// (a `Process:` line right after a fatal exception header) and
/// `native-crash-<signal>[-<package>]`. Java crashes fire one record late: the
/// header itself is quiet and the record after it carries the reason.
pub struct CrashDetector {
    java_header: Regex,
    java_process: Regex,
    native_signal: Regex,
    trailing_paren: Regex,
}

impl Default for CrashDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CrashDetector {
    pub fn new() -> Self {
        Self {
            java_header: Regex::new(r"FATAL EXCEPTION:\s*(?P<thread>.+?)\s*$")
                .expect("java header pattern is valid"),
            java_process: Regex::new(r"(?:^|:\s)Process:\s*(?P<package>[^,\s]+)")
                .expect("java process pattern is valid"),
            native_signal: Regex::new(r"Fatal signal \d+ \((?P<signal>SIG[A-Z0-9]+)\)")
                .expect("native signal pattern is valid"),
            trailing_paren: Regex::new(r"\((?P<inner>[^()]+)\)\s*$")
                .expect("trailing paren pattern is valid"),
        }
    }

    fn java_thread(&self, text: &str) -> Option<String> {
        self.java_header
            .captures(text)
            .map(|c| c["thread"].to_string())
    }

    fn native_reason(&self, text: &str) -> Option<String> {
        let caps = self.native_signal.captures(text)?;
        let signal = &caps["signal"];

        let package = self
            .trailing_paren
            .captures(text)
            .map(|c| c["inner"].trim().to_string())
            .filter(|p| !p.is_empty() && p != signal);

        Some(match package {
            Some(package) => format!("native-crash-{signal}-{package}"),
            None => format!("native-crash-{signal}"),
        })
    }
}

impl Detector for CrashDetector {
    fn name(&self) -> &'static str {
        "crash"
    }

    fn evaluate(&self, ctx: &DetectCtx<'_>) -> Result<Detection, DetectError> {
        let message = ctx.record.message.as_str();

        // A fatal exception header fires on the record after it, so the
        // package from a following `Process:` line lands in the reason.
        let header_thread = ctx.previous.as_ref().and_then(|p| {
            self.java_thread(&p.record.message)
                .or_else(|| self.java_thread(p.raw))
        });

        if let Some(thread) = header_thread {
            return Ok(match self.java_process.captures(message) {
                Some(caps) => {
                    Detection::fire(format!("java-crash-{thread}-{}", &caps["package"]))
                }
                None => Detection::fire(format!("java-crash-{thread}")),
            });
        }

        let native = self
            .native_reason(message)
            .or_else(|| self.native_reason(ctx.raw));
        if let Some(reason) = native {
            return Ok(Detection::fire(reason));
        }

        Ok(Detection::Quiet)
    }
}
