use crate::source::{CaptureTool, SourceError, StartFilter};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::BufReader;
use tokio::process::{Child, ChildStdout};

/// The running `logcat` process.
pub struct LogSource {
    child: Child,
    stdout: Option<ChildStdout>,
}

impl LogSource {
    pub fn logcat_args(filter: &StartFilter) -> Vec<String> {
        let mut args = vec!["logcat".to_string(), "-v".into(), "threadtime".into()];
        args.extend(filter.logcat_args());
        args
    }

    pub fn spawn(tool: &CaptureTool, filter: &StartFilter) -> Result<Self, SourceError> {
        Self::spawn_with_args(tool, Self::logcat_args(filter))
    }

    pub fn spawn_with_args(tool: &CaptureTool, args: Vec<String>) -> Result<Self, SourceError> {
        let mut child = tool
            .command(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SourceError::spawn(&tool.program, e))?;

        let stdout = child.stdout.take().ok_or(SourceError::NoStdout)?;
        tracing::info!(program = %tool.program, ?args, pid = child.id(), "capture stream started");

        Ok(Self {
            child,
            stdout: Some(stdout),
        })
    }

    /// The stream; available once.
    pub fn take_reader(&mut self) -> Option<BufReader<ChildStdout>> {
        self.stdout.take().map(BufReader::new)
    }

    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Ask the process to exit, then kill it if it is still around after
    /// `grace`. Best-effort and safe to call more than once.
    pub async fn terminate(&mut self, grace: Duration) {
        if matches!(self.child.try_wait(), Ok(Some(_))) {
            return;
        }

        #[cfg(unix)]
        if let Some(pid) = self.child.id() {
            use nix::sys::signal::{Signal, kill};
            use nix::unistd::Pid;

            if let Err(e) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
                tracing::debug!(error = %e, pid, "failed to signal capture stream");
            }
        }

        match tokio::time::timeout(grace, self.child.wait()).await {
            Ok(Ok(status)) => tracing::debug!(%status, "capture stream exited"),
            _ => {
                if let Err(e) = self.child.kill().await {
                    tracing::debug!(error = %e, "failed to kill capture stream");
                }
            }
        }
    }
}
