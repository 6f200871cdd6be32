use crate::conf::{CaptureConfig, ConfigError, load_config};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn load_config_overrides_only_given_attributes() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("logtrap.hcl");

    fs::write(
        &path,
        r#"
output_dir      = "/var/log/bt"
prefix          = "bt"
retention_hours = 12
cooldown_secs   = 0
keywords        = ["gatt_error; disconnect", "Hci"]
serial          = "emulator-5554"
"#,
    )
    .unwrap();

    // Act
    let cfg = load_config(&path).unwrap();

    // Assert
    assert_eq!(
        cfg,
        CaptureConfig {
            output_dir: PathBuf::from("/var/log/bt"),
            prefix: "bt".into(),
            retention_hours: 12,
            cooldown_secs: 0,
            keywords: vec!["gatt_error".into(), "disconnect".into(), "Hci".into()],
            serial: Some("emulator-5554".into()),
            ..CaptureConfig::default()
        }
    );
}

#[test]
fn empty_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logtrap.hcl");
    fs::write(&path, "").unwrap();

    let cfg = load_config(&path).unwrap();

    assert_eq!(cfg, CaptureConfig::default());
    assert_eq!(cfg.retention_hours, 36);
    assert_eq!(cfg.cooldown_secs, 900);
    assert_eq!(cfg.sweep_interval_secs, 300);
    assert_eq!(cfg.snapshot_path(), PathBuf::from("logs").join("snapshots"));
}

#[test]
fn unknown_attribute_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logtrap.hcl");
    fs::write(&path, "retension_hours = 4\n").unwrap();

    let err = load_config(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    assert!(err.hint().is_some());
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempdir().unwrap();

    let err = load_config(&dir.path().join("absent.hcl")).unwrap_err();

    assert!(matches!(err, ConfigError::ReadFile { .. }));
}
