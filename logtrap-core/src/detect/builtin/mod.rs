mod congestion;
mod crash;
mod fault_tag;
mod indication_timeout;
mod keyword;
mod notify_rollover;

pub use congestion::CongestionDetector;
pub use crash::CrashDetector;
pub use fault_tag::FaultTagDetector;
pub use indication_timeout::IndicationTimeoutDetector;
pub use keyword::KeywordDetector;
pub use notify_rollover::NotifyRolloverDetector;
