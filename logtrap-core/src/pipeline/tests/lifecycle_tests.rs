use crate::conf::CaptureConfig;
use crate::pipeline::tests::test_helpers::{GATT_TIMEOUT_LINE, harness_without_tool};
use crate::pipeline::{Cleanup, Lifecycle, Phase, PidFile, ShutdownHandle, sweep_roots};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn phases_only_move_forward() {
    let mut lifecycle = Lifecycle::new();
    assert_eq!(lifecycle.phase(), Phase::Starting);

    assert!(lifecycle.advance(Phase::Streaming));
    assert!(!lifecycle.advance(Phase::Starting));
    assert!(!lifecycle.advance(Phase::Streaming));
    assert!(lifecycle.advance(Phase::Terminated));
    assert_eq!(lifecycle.phase(), Phase::Terminated);
}

#[test]
fn snapshot_dir_inside_output_is_swept_once() {
    let cfg = CaptureConfig::default();
    assert_eq!(sweep_roots(&cfg), vec![PathBuf::from("logs")]);

    let outside = std::env::temp_dir().join("logtrap-snaps");
    let cfg = CaptureConfig {
        snapshot_dir: outside.clone(),
        ..CaptureConfig::default()
    };
    assert_eq!(sweep_roots(&cfg), vec![PathBuf::from("logs"), outside]);
}

#[test]
fn pid_file_is_removed_once() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("logtrap.pid");

    let mut pid_file = PidFile::create(&path).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.trim(), std::process::id().to_string());

    pid_file.remove();
    assert!(!path.exists());
    assert!(pid_file.path().is_none());
    pid_file.remove();
}

#[tokio::test]
async fn cleanup_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let mut h = harness_without_tool(tmp.path(), false, Duration::ZERO);
    h.pipeline.process_line(GATT_TIMEOUT_LINE).unwrap();
    assert!(h.pipeline.writer().current_path().is_some());

    let pid_path = tmp.path().join("logtrap.pid");
    let shutdown = ShutdownHandle::new();
    let sweeper = tokio::spawn({
        let shutdown = shutdown.clone();
        async move { shutdown.wait().await }
    });
    let mut cleanup = Cleanup::new(shutdown.clone())
        .with_sweeper(sweeper)
        .with_pid_file(Some(PidFile::create(&pid_path).unwrap()))
        .with_grace(Duration::from_millis(10));

    cleanup.run(&mut h.pipeline, None).await;

    assert!(cleanup.is_done());
    assert!(shutdown.is_triggered());
    assert!(h.pipeline.writer().current_path().is_none());
    assert!(!pid_path.exists());

    // Racing a signal with end of stream: the second run is a no-op.
    cleanup.run(&mut h.pipeline, None).await;
    assert!(cleanup.is_done());
}
