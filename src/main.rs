use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use spdlog::{info, warn};

use permafix::config::open_config;
use permafix::logger::configure_logger;
use permafix::run::{run, RunMode};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Broken URL report (CSV, first column is the URL)
    report: Option<PathBuf>,

    /// Posts directory, holding the archived and redirects directories
    posts_dir: Option<PathBuf>,

    /// When present, only generate redirects. The value is ignored
    redirects: Option<String>,

    /// Config path
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Wait for ENTER before exiting after a repair
    #[arg(short, long)]
    wait: bool,

    /// Log what would change without touching any file
    #[arg(short = 'n', long)]
    dry_run: bool,
}

fn wait_for_enter() -> io::Result<()> {
    println!("Hit ENTER to close");
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (mut config, config_path) = open_config(args.config_path)?;
    config.run.dry_run |= args.dry_run;
    config.run.wait_for_enter |= args.wait;

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    if let Some(path) = config_path {
        info!("Read config from {}", path.display());
    }
    if config.run.dry_run {
        info!("Dry run, no file will be changed");
    }

    let mode = RunMode::from_args(args.report, args.posts_dir, args.redirects);
    run(&mode, &config)?;

    if config.run.wait_for_enter && matches!(mode, RunMode::Repair { .. }) {
        wait_for_enter()?;
    }

    Ok(())
}
