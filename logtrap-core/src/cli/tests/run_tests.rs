use crate::cli::{LogFormat, RunArgs};
use crate::conf::{CaptureConfig, ConfigError};
use crate::logging::LogMode;
use clap::Parser;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    run: RunArgs,
}

fn parse(args: &[&str]) -> RunArgs {
    TestCli::try_parse_from(std::iter::once("logtrap").chain(args.iter().copied()))
        .unwrap()
        .run
}

#[test]
fn no_flags_resolve_to_defaults() {
    assert_eq!(parse(&[]).resolve().unwrap(), CaptureConfig::default());
}

#[test]
fn legacy_flag_names_are_accepted() {
    let args = parse(&[
        "--dir",
        "out",
        "--retention",
        "2",
        "--no-bugreport",
        "--bugreport-cooldown",
        "5",
    ]);
    let cfg = args.resolve().unwrap();

    assert_eq!(cfg.output_dir, PathBuf::from("out"));
    assert_eq!(cfg.retention_hours, 2);
    assert!(!cfg.snapshot_enabled);
    assert_eq!(cfg.cooldown_secs, 5);
}

#[test]
fn flags_override_the_config_file() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("logtrap.hcl");
    fs::write(
        &path,
        r#"
prefix        = "file"
cooldown_secs = 60
keywords      = ["from_file"]
control       = true
"#,
    )
    .unwrap();
    let config = path.to_string_lossy().into_owned();

    // Act
    let cfg = parse(&["-c", &config, "--prefix", "flag", "-k", "a;b", "-k", "c", "-s", "R58M"])
        .resolve()
        .unwrap();

    // Assert
    assert_eq!(cfg.prefix, "flag");
    assert_eq!(cfg.cooldown_secs, 60);
    assert!(cfg.control);
    assert_eq!(cfg.keywords, vec!["from_file", "a", "b", "c"]);
    assert_eq!(cfg.serial.as_deref(), Some("R58M"));
}

#[test]
fn resolved_config_is_validated() {
    let err = parse(&["--retention", "0"]).resolve().unwrap_err();
    assert!(matches!(err, ConfigError::ZeroRetention));

    let err = parse(&["--prefix", "a/b"]).resolve().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPrefix { .. }));
}

#[test]
fn explicit_log_format_wins() {
    let args = parse(&["--log-format", "json"]);
    assert_eq!(args.log_format, Some(LogFormat::Json));
    assert_eq!(args.log_mode(), LogMode::Json);
    assert_eq!(parse(&["--log-format", "pretty"]).log_mode(), LogMode::Pretty);
}
