//! Sysgraph - Live CPU and memory line charts.
//!
//! Samples this machine (or a synthetic source with `--demo`) and draws
//! zoomable, scrollable charts of CPU and memory usage.

use std::path::PathBuf;

use clap::Parser;
use iced::application;

use sysgraph::config::{AppConfig, SourceKind};
use sysgraph::Sysgraph;
use sysgraph_core::{dump_config, init_tracing};

/// Command line arguments.
#[derive(Parser, Debug, Clone)]
#[command(about = "Live CPU and memory line charts")]
struct Args {
    /// Path to configuration file (default: <config dir>/sysgraph/sysgraph.json5).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Chart synthetic data instead of this machine.
    #[arg(long)]
    demo: bool,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,
}

/// Resolve the configuration from the CLI arguments.
///
/// An explicit `--config` must exist; the default path is optional.
fn load_config(args: &Args) -> anyhow::Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => match AppConfig::default_path() {
            Some(path) if path.exists() => AppConfig::load(&path)?,
            _ => AppConfig::default(),
        },
    };

    apply_overrides(&mut config, args);
    Ok(config)
}

/// CLI flags win over the configuration file.
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.demo {
        config.source.kind = SourceKind::Demo;
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    if args.print_config {
        println!("{}", dump_config(&config)?);
        return Ok(());
    }

    init_tracing(&config.logging)?;

    tracing::info!(
        source = ?config.source.kind,
        poll_interval_ms = config.source.poll_interval_ms,
        "Starting Sysgraph"
    );

    // Run the Iced application
    application(
        move || Sysgraph::boot(config.clone()),
        Sysgraph::update,
        Sysgraph::view,
    )
    .title(Sysgraph::title)
    .subscription(Sysgraph::subscription)
    .theme(Sysgraph::theme)
    .run()
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
