use crate::snapshot::{CaptureState, SnapshotSettings, SnapshotTrigger};
use crate::source::CaptureTool;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

fn settings(dir: &Path, script: &str, timeout: Duration) -> SnapshotSettings {
    SnapshotSettings {
        dir: dir.to_path_buf(),
        tool: CaptureTool::new("sh", None),
        args: vec!["-c".into(), script.into()],
        extension: "zip".into(),
        timeout,
    }
}

fn artifacts(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn bugreport_settings_default_to_zip_archives() {
    let tool = CaptureTool::new("adb", None);
    let s = SnapshotSettings::bugreport("snaps", tool, Duration::from_secs(1));
    assert_eq!(s.args, vec!["bugreport"]);
    assert_eq!(s.extension, "zip");
}

#[tokio::test]
async fn disabled_trigger_does_nothing() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("snaps");
    let trigger = SnapshotTrigger::new(
        settings(&dir, "echo report", Duration::from_secs(5)),
        CaptureState::new(false),
    );

    assert!(trigger.trigger(Some("bt-fault")).is_none());
    assert!(artifacts(&dir).is_empty());
}

#[tokio::test]
async fn missing_tool_counts_as_failure() {
    let tmp = TempDir::new().unwrap();
    let mut s = settings(tmp.path(), "", Duration::from_secs(5));
    s.tool = CaptureTool::new("logtrap-definitely-not-installed", None);
    let trigger = SnapshotTrigger::new(s, CaptureState::new(true));

    trigger.trigger(None).unwrap().wait().await;

    let status = trigger.state().status();
    assert_eq!((status.completed, status.failed), (0, 1));
    assert!(!status.in_flight);
    assert!(trigger.cooldown_elapsed(Duration::from_secs(3600)));
}

#[cfg(unix)]
#[tokio::test]
async fn capture_output_lands_in_named_artifact() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("snaps");
    let trigger = SnapshotTrigger::new(
        settings(&dir, "echo report; echo oops >&2", Duration::from_secs(5)),
        CaptureState::new(true),
    );

    let task = trigger.trigger(Some("BtGatt fault")).unwrap();
    let path = task.path.clone();
    assert!(path.starts_with(&dir));
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("snapshot_"), "{name}");
    assert!(name.ends_with("_btgatt-fault.zip"), "{name}");

    task.wait().await;

    let body = std::fs::read_to_string(&path).unwrap();
    assert!(body.contains("report"));
    assert!(body.contains("oops"));
    assert_eq!(trigger.state().status().completed, 1);
    assert!(!trigger.state().is_in_flight());
}

#[cfg(unix)]
#[tokio::test]
async fn requests_while_in_flight_are_dropped() {
    let tmp = TempDir::new().unwrap();
    let trigger = SnapshotTrigger::new(
        settings(tmp.path(), "sleep 0.3; echo done", Duration::from_secs(5)),
        CaptureState::new(true),
    );

    let first = trigger.trigger(Some("first")).unwrap();
    assert!(trigger.trigger(Some("second")).is_none());
    first.wait().await;

    let names = artifacts(tmp.path());
    assert_eq!(names.len(), 1, "{names:?}");
    assert!(names[0].ends_with("_first.zip"));
}

#[cfg(unix)]
#[tokio::test]
async fn completed_capture_starts_cooldown() {
    let tmp = TempDir::new().unwrap();
    let trigger = SnapshotTrigger::new(
        settings(tmp.path(), "true", Duration::from_secs(5)),
        CaptureState::new(true),
    );
    let cooldown = Duration::from_secs(900);

    assert!(trigger.cooldown_elapsed(cooldown));
    trigger.trigger(None).unwrap().wait().await;

    assert!(!trigger.cooldown_elapsed(cooldown));
    assert!(trigger.cooldown_elapsed(Duration::ZERO));
}

#[cfg(unix)]
#[tokio::test]
async fn failed_capture_leaves_cooldown_open() {
    let tmp = TempDir::new().unwrap();
    let trigger = SnapshotTrigger::new(
        settings(tmp.path(), "exit 3", Duration::from_secs(5)),
        CaptureState::new(true),
    );

    trigger.trigger(None).unwrap().wait().await;

    let status = trigger.state().status();
    assert_eq!((status.completed, status.failed), (0, 1));
    assert!(status.last_completed.is_none());
    assert!(trigger.cooldown_elapsed(Duration::from_secs(900)));
}

#[cfg(unix)]
#[tokio::test]
async fn slow_capture_times_out() {
    let tmp = TempDir::new().unwrap();
    let trigger = SnapshotTrigger::new(
        settings(tmp.path(), "sleep 10", Duration::from_millis(100)),
        CaptureState::new(true),
    );

    tokio::time::timeout(Duration::from_secs(5), trigger.trigger(None).unwrap().wait())
        .await
        .expect("timed-out capture should be reaped");

    assert_eq!(trigger.state().status().failed, 1);
    assert!(!trigger.state().is_in_flight());
}
