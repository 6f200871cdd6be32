use crate::pipeline::ShutdownHandle;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use walkdir::WalkDir;

const LOG_EXTENSIONS: &[&str] = &["csv", "txt"];
const ARCHIVE_EXTENSION: &str = "zip";
const ARCHIVE_MARKERS: &[&str] = &["snapshot", "bugreport"];

#[derive(Debug, Clone, Copy)]
pub struct RetentionPolicy {
    pub max_age: Duration,
}

impl RetentionPolicy {
    pub fn from_hours(hours: u64) -> Self {
        Self {
            max_age: Duration::from_secs(hours.saturating_mul(3600)),
        }
    }

    /// Anything modified before this instant is eligible for deletion.
    pub fn cutoff(&self, now: SystemTime) -> SystemTime {
        now.checked_sub(self.max_age).unwrap_or(SystemTime::UNIX_EPOCH)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub files_removed: usize,
    pub dirs_removed: usize,
}

/// Whether the sweeper is allowed to consider `path` at all.
pub fn is_sweepable(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();

    if LOG_EXTENSIONS.contains(&ext.as_str()) {
        return true;
    }

    if ext == ARCHIVE_EXTENSION {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        return ARCHIVE_MARKERS.iter().any(|m| name.contains(m));
    }

    false
}

/// Run one cleanup pass over every root.
///
/// Walks bottom-up so directories emptied by this pass are removed in the same
/// pass. The roots themselves are kept. Every filesystem error is ignored.
pub fn sweep(roots: &[PathBuf], policy: RetentionPolicy, now: SystemTime) -> SweepReport {
    let cutoff = policy.cutoff(now);
    let mut report = SweepReport::default();

    for root in roots {
        for entry in WalkDir::new(root)
            .min_depth(1)
            .contents_first(true)
            .into_iter()
            .filter_map(Result::ok)
        {
            let path = entry.path();
            let file_type = entry.file_type();

            if file_type.is_file() {
                if is_sweepable(path) && remove_if_older(path, cutoff) {
                    report.files_removed += 1;
                }
            } else if file_type.is_dir() && remove_if_empty(path) {
                report.dirs_removed += 1;
            }
        }
    }

    report
}

fn remove_if_older(path: &Path, cutoff: SystemTime) -> bool {
    let modified = match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return false,
    };

    if modified >= cutoff {
        return false;
    }

    match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, path = %path.display(), "retention delete failed");
            false
        }
    }
}

fn remove_if_empty(path: &Path) -> bool {
    let is_empty = match fs::read_dir(path) {
        Ok(mut it) => it.next().is_none(),
        Err(_) => return false,
    };

    is_empty && fs::remove_dir(path).is_ok()
}

/// Periodic sweeper. Waits `interval` before each pass and returns as soon as
/// `shutdown` fires.
pub async fn run_sweeper(
    roots: Vec<PathBuf>,
    policy: RetentionPolicy,
    interval: Duration,
    shutdown: ShutdownHandle,
) {
    let mut stop = shutdown.subscribe();
    tracing::info!(
        interval_secs = interval.as_secs(),
        max_age_secs = policy.max_age.as_secs(),
        "retention sweeper started"
    );

    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = stop.wait_for(|stopped| *stopped) => break,
        }

        let pass_roots = roots.clone();
        let result =
            tokio::task::spawn_blocking(move || sweep(&pass_roots, policy, SystemTime::now())).await;

        match result {
            Ok(report) if report.files_removed > 0 || report.dirs_removed > 0 => {
                tracing::info!(
                    files_removed = report.files_removed,
                    dirs_removed = report.dirs_removed,
                    "retention sweep finished"
                );
            }
            Ok(_) => tracing::debug!("retention sweep found nothing to remove"),
            Err(e) => tracing::warn!(error = %e, "retention sweep task failed"),
        }
    }

    tracing::info!("retention sweeper stopped");
}
