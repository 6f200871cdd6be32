use crate::snapshot::{CaptureError, CaptureState, artifact_name};
use crate::source::CaptureTool;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// How snapshots are captured and where they land.
#[derive(Debug, Clone)]
pub struct SnapshotSettings {
    pub dir: PathBuf,
    pub tool: CaptureTool,
    /// Arguments passed to the tool; its stdout and stderr become the artifact.
    pub args: Vec<String>,
    pub extension: String,
    pub timeout: Duration,
}

impl SnapshotSettings {
    pub fn bugreport(dir: impl Into<PathBuf>, tool: CaptureTool, timeout: Duration) -> Self {
        Self {
            dir: dir.into(),
            tool,
            args: vec!["bugreport".to_string()],
            extension: "zip".to_string(),
            timeout,
        }
    }
}

/// A capture that was started. Dropping it does not cancel the capture.
#[derive(Debug)]
pub struct SnapshotTask {
    pub id: Uuid,
    pub path: PathBuf,
    pub started_at: DateTime<Local>,
    handle: JoinHandle<()>,
}

impl SnapshotTask {
    /// Wait for the capture to finish and its state update to land.
    pub async fn wait(self) {
        if let Err(e) = self.handle.await {
            tracing::warn!(id = %self.id, error = %e, "snapshot task aborted");
        }
    }
}

#[derive(Clone)]
pub struct SnapshotTrigger {
    settings: Arc<SnapshotSettings>,
    state: CaptureState,
}

impl SnapshotTrigger {
    pub fn new(settings: SnapshotSettings, state: CaptureState) -> Self {
        Self {
            settings: Arc::new(settings),
            state,
        }
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn cooldown_elapsed(&self, cooldown: Duration) -> bool {
        self.state.cooldown_elapsed(cooldown)
    }

    /// Start a capture unless one is already running or capture is disabled.
    ///
    /// Never blocks on the capture itself. Cooldown is the caller's check.
    pub fn trigger(&self, reason: Option<&str>) -> Option<SnapshotTask> {
        if let Err(refusal) = self.state.try_begin() {
            tracing::debug!(?refusal, reason = reason.unwrap_or(""), "snapshot request dropped");
            return None;
        }

        let started_at = Local::now();
        let id = Uuid::new_v4();
        let path = self.settings.dir.join(artifact_name(
            &started_at,
            reason,
            &self.settings.extension,
        ));

        tracing::info!(
            %id,
            path = %path.display(),
            reason = reason.unwrap_or(""),
            "snapshot started"
        );

        let settings = self.settings.clone();
        let state = self.state.clone();
        let artifact = path.clone();
        let handle = tokio::spawn(async move {
            let result = capture(&settings, &artifact).await;
            state.finish(result.is_ok());

            match result {
                Ok(()) => tracing::info!(%id, path = %artifact.display(), "snapshot completed"),
                Err(e) => {
                    tracing::warn!(%id, path = %artifact.display(), error = %e, "snapshot failed")
                }
            }
        });

        Some(SnapshotTask {
            id,
            path,
            started_at,
            handle,
        })
    }
}

async fn capture(settings: &SnapshotSettings, path: &Path) -> Result<(), CaptureError> {
    let artifact_err = |source| CaptureError::Artifact {
        path: path.to_path_buf(),
        source,
    };

    tokio::fs::create_dir_all(&settings.dir)
        .await
        .map_err(artifact_err)?;

    let stdout = tokio::fs::File::create(path)
        .await
        .map_err(artifact_err)?
        .into_std()
        .await;
    let stderr = stdout.try_clone().map_err(artifact_err)?;

    let mut child = settings
        .tool
        .command(&settings.args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr))
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| CaptureError::Spawn {
            program: settings.tool.program.clone(),
            source,
        })?;

    let status = match tokio::time::timeout(settings.timeout, child.wait()).await {
        Ok(status) => status.map_err(CaptureError::Wait)?,
        Err(_) => {
            let _ = child.kill().await;
            return Err(CaptureError::Timeout(settings.timeout));
        }
    };

    if status.success() {
        Ok(())
    } else {
        Err(CaptureError::Exit(status))
    }
}
