use crate::conf::{CaptureConfig, ConfigError, load_config, validate};
use owo_colors::OwoColorize;
use std::path::PathBuf;

pub fn check(path: PathBuf, plain: bool) -> anyhow::Result<()> {
    match load_config(&path).and_then(|cfg| validate(&cfg).map(|_| cfg)) {
        Ok(cfg) => {
            print_summary(&cfg);
            Ok(())
        }
        Err(err) => {
            print_config_error(&err, plain);
            std::process::exit(1);
        }
    }
}

fn print_summary(cfg: &CaptureConfig) {
    println!("✔ Config loaded successfully");
    println!(
        "✔ logs in {} as {}_<minute>.csv",
        cfg.output_dir.display(),
        cfg.prefix
    );
    println!("✔ retention {}h, swept every {}s", cfg.retention_hours, cfg.sweep_interval_secs);
    if cfg.snapshot_enabled {
        println!(
            "✔ snapshots in {} (cooldown {}s)",
            cfg.snapshot_path().display(),
            cfg.cooldown_secs
        );
    } else {
        println!("✔ snapshots disabled");
    }
    println!("✔ {} custom keywords", cfg.keywords.len());
}

fn print_config_error(err: &ConfigError, plain: bool) {
    if plain {
        eprintln!("error: {err}");
    } else {
        eprintln!();
        eprintln!("{}: {err}", "error".red().bold());
    }

    if let Some(hint) = err.hint() {
        eprintln!();
        eprintln!("{hint}");
    }
}
