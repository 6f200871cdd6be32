//! Text commands that switch snapshot capture on and off at runtime.

mod channel;
mod command;

#[cfg(test)]
mod tests;

pub use channel::run_control;
pub use command::{ControlCommand, ControlReply, apply};
