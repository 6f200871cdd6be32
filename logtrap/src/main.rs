use anyhow::Context;
use clap::{Parser, Subcommand};
use logtrap_core::cli::{ConfigCmd, RunArgs, conf};
use logtrap_core::logging::init_logging;
use std::time::Duration;

/// Blocking reads (stdin for the control channel) are not waited for at exit.
const RUNTIME_SHUTDOWN: Duration = Duration::from_millis(250);

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(
    name = "logtrap",
    version,
    about = "Capture logcat to rotated CSV files and snapshot on faults",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Capture until the stream ends or a signal arrives (default)
    Run(RunArgs),

    /// Config file tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Config { cmd }) => conf::run(cmd),
        Some(Command::Run(args)) => run(args),
        None => run(cli.run),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    init_logging(args.log_mode());
    let cfg = args.resolve()?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build Tokio runtime")?;

    let result = rt.block_on(logtrap_core::pipeline::run(cfg));
    rt.shutdown_timeout(RUNTIME_SHUTDOWN);

    result.context("capture failed")
}
