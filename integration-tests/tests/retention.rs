#![cfg(unix)]

use integration_tests::harness::{FakeTool, csv_files};
use logtrap_core::conf::CaptureConfig;
use logtrap_core::pipeline::run;
use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn age(path: &Path, by: Duration) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::now() - by)
        .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn sweeper_prunes_old_files_while_capturing() {
    // Arrange
    let root = TempDir::new().unwrap();
    let logs = root.path().join("logs");
    let old_bucket = logs.join("2020-01-01_00-00");
    let snapshots = logs.join("snapshots");
    fs::create_dir_all(&old_bucket).unwrap();
    fs::create_dir_all(&snapshots).unwrap();

    let old_csv = old_bucket.join("bt_2020-01-01_00-00.csv");
    let old_zip = snapshots.join("snapshot_2020-01-01_00-00-00.zip");
    let unrelated = snapshots.join("notes.zip");
    for path in [&old_csv, &old_zip, &unrelated] {
        fs::write(path, b"old").unwrap();
        age(path, Duration::from_secs(48 * 3600));
    }

    let tool = FakeTool::builder()
        .probe("2024-01-15 10:00:00.000")
        .line("01-15 10:23:45.123 1 2 I Foo: fresh")
        .linger(Duration::from_millis(1800))
        .build();
    let cfg = CaptureConfig {
        output_dir: logs.clone(),
        prefix: "bt".into(),
        retention_hours: 1,
        sweep_interval_secs: 1,
        tool: tool.program(),
        ..CaptureConfig::default()
    };

    // Act
    run(cfg).await.unwrap();

    // Assert
    assert!(!old_csv.exists());
    assert!(!old_bucket.exists());
    assert!(!old_zip.exists());
    assert!(unrelated.exists());
    assert_eq!(csv_files(&logs).len(), 1);
}
