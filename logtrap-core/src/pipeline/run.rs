use crate::conf::{CaptureConfig, validate};
use crate::control::run_control;
use crate::detect::DetectorSet;
use crate::pipeline::{
    Lifecycle, Phase, PidFile, Pipeline, PipelineError, ShutdownHandle, StreamEnd, run_stream,
};
use crate::retention::run_sweeper;
use crate::rotate::RotatingWriter;
use crate::snapshot::{CaptureState, SnapshotSettings, SnapshotTrigger};
use crate::source::{CaptureTool, LogSource, SourceError, resolve_start_filter};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::BufReader;
use tokio::task::JoinHandle;

/// Sleep after stopping the capture stream before exit.
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

const TERMINATE_GRACE: Duration = Duration::from_secs(2);

/// Directories the sweeper walks: the output tree, plus the snapshot
/// directory when it lives outside it.
pub fn sweep_roots(config: &CaptureConfig) -> Vec<PathBuf> {
    let output = config.output_dir.clone();
    let snapshots = config.snapshot_path();

    if snapshots.starts_with(&output) {
        vec![output]
    } else {
        vec![output, snapshots]
    }
}

/// The Stopping sequence. Runs once; later calls return immediately.
pub struct Cleanup {
    shutdown: ShutdownHandle,
    sweeper: Option<JoinHandle<()>>,
    pid_file: Option<PidFile>,
    grace: Duration,
    done: bool,
}

impl Cleanup {
    pub fn new(shutdown: ShutdownHandle) -> Self {
        Self {
            shutdown,
            sweeper: None,
            pid_file: None,
            grace: SHUTDOWN_GRACE,
            done: false,
        }
    }

    pub fn with_sweeper(mut self, sweeper: JoinHandle<()>) -> Self {
        self.sweeper = Some(sweeper);
        self
    }

    pub fn with_pid_file(mut self, pid_file: Option<PidFile>) -> Self {
        self.pid_file = pid_file;
        self
    }

    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Stop the sweeper, close the current output file, stop the capture
    /// stream, then wait out the grace period. Snapshot captures in flight
    /// are left running.
    pub async fn run(&mut self, pipeline: &mut Pipeline, source: Option<&mut LogSource>) {
        if std::mem::replace(&mut self.done, true) {
            return;
        }

        self.shutdown.trigger();
        if let Some(sweeper) = self.sweeper.take() {
            if tokio::time::timeout(self.grace, sweeper).await.is_err() {
                tracing::debug!("sweeper still busy at shutdown");
            }
        }

        pipeline.close();

        if let Some(source) = source {
            source.terminate(TERMINATE_GRACE).await;
        }

        tokio::time::sleep(self.grace).await;

        if let Some(mut pid_file) = self.pid_file.take() {
            pid_file.remove();
        }

        let stats = pipeline.stats();
        tracing::info!(
            lines = stats.lines,
            skipped = stats.skipped,
            unparsed = stats.unparsed,
            firings = stats.firings,
            snapshots = stats.snapshots,
            "capture stopped"
        );
    }
}

/// Run the capture pipeline until the stream ends, a signal arrives, or the
/// control channel asks to quit.
pub async fn run(config: CaptureConfig) -> Result<(), PipelineError> {
    validate(&config)?;
    let mut lifecycle = Lifecycle::new();

    let writer = RotatingWriter::new(&config.output_dir, &config.prefix)?;
    let tool = CaptureTool::new(&config.tool, config.serial.clone());

    let filter = resolve_start_filter(&tool).await;
    let mut source = LogSource::spawn(&tool, &filter)?;
    let reader = source.take_reader().ok_or(SourceError::NoStdout)?;

    let shutdown = ShutdownHandle::new();
    let state = CaptureState::new(config.snapshot_enabled);
    let settings =
        SnapshotSettings::bugreport(config.snapshot_path(), tool.clone(), config.capture_timeout());
    let trigger = SnapshotTrigger::new(settings, state.clone());
    let detectors = DetectorSet::builtin(&config.keywords);
    tracing::info!(
        output_dir = %config.output_dir.display(),
        snapshot_dir = %config.snapshot_path().display(),
        snapshots = config.snapshot_enabled,
        cooldown_secs = config.cooldown_secs,
        detectors = ?detectors.names(),
        "capture configured"
    );

    let sweeper = tokio::spawn(run_sweeper(
        sweep_roots(&config),
        config.retention(),
        config.sweep_interval(),
        shutdown.clone(),
    ));

    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if let Err(e) = shutdown.install_signal_handler().await {
                tracing::warn!(error = %e, "failed to install signal handler");
            }
        }
    });

    if config.control {
        tracing::info!("control channel on stdin: on, off, toggle, status, quit");
        tokio::spawn(run_control(
            BufReader::new(tokio::io::stdin()),
            state.clone(),
            shutdown.clone(),
        ));
    }

    let pid_file = config.pid_file.as_ref().and_then(|path| match PidFile::create(path) {
        Ok(pid_file) => {
            tracing::info!(pid_file = %path.display(), "pid file written");
            Some(pid_file)
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to write pid file; continuing");
            None
        }
    });

    let mut pipeline = Pipeline::new(writer, detectors, trigger, config.cooldown())
        .skip_before(filter.skip_before());
    let mut cleanup = Cleanup::new(shutdown.clone())
        .with_sweeper(sweeper)
        .with_pid_file(pid_file);

    lifecycle.advance(Phase::Streaming);
    let result = run_stream(reader, &mut pipeline, &shutdown).await;

    lifecycle.advance(Phase::Stopping);
    match &result {
        Ok(StreamEnd::Shutdown) => tracing::info!("stopping on request"),
        Ok(end) => tracing::info!(?end, "stopping at end of stream"),
        Err(e) => tracing::error!(error = %e, "stopping on error"),
    }
    cleanup.run(&mut pipeline, Some(&mut source)).await;

    lifecycle.advance(Phase::Terminated);
    result.map(|_| ())
}
