//! Minute-rotated CSV persistence.

mod error;
mod writer;


pub use error::RotateError;
pub use writer::{HEADER, RotatingWriter};
