//! The external capture tool and the log stream it produces.

mod error;
mod process;
mod start_filter;
mod tool;


pub use error::SourceError;
pub use process::LogSource;
pub use start_filter::{StartFilter, parse_probe_output, probe_start_time, resolve_start_filter};
pub use tool::{CaptureTool, SERIAL_ENV};
