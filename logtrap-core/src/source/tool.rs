use std::ffi::OsStr;
use tokio::process::Command;

/// Environment variable the capture tool reads to pick a device.
pub const SERIAL_ENV: &str = "ANDROID_SERIAL";

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// How to invoke the capture tool (`adb` by default).
#[derive(Debug, Clone)]
pub struct CaptureTool {
    pub program: String,
    /// Device serial, passed through the environment rather than a flag.
    pub serial: Option<String>,
}

impl CaptureTool {
    pub fn new(program: impl Into<String>, serial: Option<String>) -> Self {
        Self {
            program: program.into(),
            serial,
        }
    }

    pub fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);

        if let Some(serial) = &self.serial {
            cmd.env(SERIAL_ENV, serial);
        }

        #[cfg(windows)]
        cmd.creation_flags(CREATE_NO_WINDOW);

        cmd
    }
}
