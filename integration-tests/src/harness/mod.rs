#[cfg(unix)]
mod fake_tool;
mod files;
pub mod tracing;

#[cfg(unix)]
pub use fake_tool::{FakeTool, FakeToolBuilder};
pub use files::{csv_files, rows, wait_for};
pub use tracing::{CapturedEvent, events, init_test_tracing, messages};
