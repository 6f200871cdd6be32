use super::{Cli, Command};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn bare_flags_run_a_capture() {
    let cli = Cli::try_parse_from(["logtrap", "--dir", "out"]).unwrap();

    assert!(cli.command.is_none());
    assert_eq!(cli.run.dir, Some(PathBuf::from("out")));
}

#[test]
fn run_subcommand_takes_its_own_flags() {
    let cli = Cli::try_parse_from(["logtrap", "run", "--dir", "out"]).unwrap();

    let Some(Command::Run(args)) = cli.command else {
        panic!("expected the run subcommand");
    };
    assert_eq!(args.dir, Some(PathBuf::from("out")));
}

#[test]
fn top_level_run_flags_are_rejected_before_a_subcommand() {
    let parsed = Cli::try_parse_from(["logtrap", "--dir", "out", "run"]);

    assert!(parsed.is_err());
}
