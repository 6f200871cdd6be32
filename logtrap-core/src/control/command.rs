use crate::snapshot::{CaptureState, CaptureStatus};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    On,
    Off,
    Toggle,
    Status,
    Quit,
    Unknown(String),
}

impl FromStr for ControlCommand {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.to_ascii_lowercase().as_str() {
            "on" => Self::On,
            "off" => Self::Off,
            "toggle" => Self::Toggle,
            "status" => Self::Status,
            "quit" => Self::Quit,
            _ => Self::Unknown(s.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlReply {
    /// Capture flag after an `on`/`off`/`toggle`.
    Capture { enabled: bool },
    Status(CaptureStatus),
    Quitting,
    Unknown(String),
}

impl Display for ControlReply {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Capture { enabled: true } => f.write_str("snapshot capture enabled"),
            Self::Capture { enabled: false } => f.write_str("snapshot capture disabled"),
            Self::Status(s) => {
                write!(
                    f,
                    "capture={} in_flight={} completed={} failed={}",
                    if s.enabled { "on" } else { "off" },
                    s.in_flight,
                    s.completed,
                    s.failed
                )?;
                if let Some(at) = s.last_completed {
                    write!(f, " last_completed={}s_ago", at.elapsed().as_secs())?;
                }
                Ok(())
            }
            Self::Quitting => f.write_str("stopping"),
            Self::Unknown(cmd) => {
                write!(f, "unknown command '{cmd}' (expected on, off, toggle, status or quit)")
            }
        }
    }
}

/// Execute one command. Only the enabled flag is ever changed; stopping the
/// pipeline on `quit` is left to the caller.
pub fn apply(cmd: &ControlCommand, state: &CaptureState) -> ControlReply {
    match cmd {
        ControlCommand::On => {
            state.set_enabled(true);
            ControlReply::Capture { enabled: true }
        }
        ControlCommand::Off => {
            state.set_enabled(false);
            ControlReply::Capture { enabled: false }
        }
        ControlCommand::Toggle => ControlReply::Capture {
            enabled: state.toggle(),
        },
        ControlCommand::Status => ControlReply::Status(state.status()),
        ControlCommand::Quit => ControlReply::Quitting,
        ControlCommand::Unknown(cmd) => ControlReply::Unknown(cmd.clone()),
    }
}
