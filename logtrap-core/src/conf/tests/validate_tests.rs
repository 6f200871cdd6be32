use crate::conf::{CaptureConfig, ConfigError, resolve_snapshot_dir, split_keywords, validate};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

#[test]
fn defaults_are_valid() {
    validate(&CaptureConfig::default()).unwrap();
}

#[test]
fn zero_retention_is_rejected() {
    let cfg = CaptureConfig {
        retention_hours: 0,
        ..CaptureConfig::default()
    };
    assert!(matches!(validate(&cfg), Err(ConfigError::ZeroRetention)));
}

#[test]
fn zero_sweep_interval_is_rejected() {
    let cfg = CaptureConfig {
        sweep_interval_secs: 0,
        ..CaptureConfig::default()
    };
    assert!(matches!(validate(&cfg), Err(ConfigError::ZeroSweepInterval)));
}

#[test]
fn prefixes_must_be_plain_names() {
    for prefix in ["", "  ", "a/b", "a\\b", ".."] {
        let cfg = CaptureConfig {
            prefix: prefix.into(),
            ..CaptureConfig::default()
        };
        assert!(
            matches!(validate(&cfg), Err(ConfigError::InvalidPrefix { .. })),
            "prefix {prefix:?} accepted"
        );
    }
}

#[test]
fn zero_cooldown_is_allowed() {
    let cfg = CaptureConfig {
        cooldown_secs: 0,
        ..CaptureConfig::default()
    };
    validate(&cfg).unwrap();
}

#[test]
fn keywords_split_on_every_separator() {
    let raw = ["a,b", " c ; d\ne", "", ",,;"];
    assert_eq!(split_keywords(&raw), vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn snapshot_dir_is_relative_to_output_dir() {
    assert_eq!(
        resolve_snapshot_dir(Path::new("logs"), Path::new("snaps")),
        PathBuf::from("logs").join("snaps")
    );

    let abs = std::env::temp_dir().join("snaps");
    assert_eq!(resolve_snapshot_dir(Path::new("logs"), &abs), abs);
}
