//! `tune`: generate racing-simulator setups from the command line.
//!
//! ```text
//! tune generate --vehicle ks_porsche_911_gt3_r_2016 --track spa --behavior attack
//! tune generate --request request.toml --pretty
//! tune behaviors
//! tune catalog
//! ```

mod commands;
mod config;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{Behaviors, CatalogList, Generate};
use config::TuneConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Physics-based setup generator
#[derive(Parser)]
#[command(name = "tune")]
#[command(about = "Generate racing-simulator setups", long_about = None)]
#[command(version)]
struct Cli {
    /// Also write logs to a file under the log directory
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate a setup and print it as JSON
    Generate(Generate),

    /// List the available behaviors
    Behaviors(Behaviors),

    /// List catalog vehicles and tracks
    Catalog(CatalogList),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = TuneConfig::from_env();
    setup_logging(&config, cli.log_file)?;

    match cli.command {
        Command::Generate(cmd) => cmd.execute(&config),
        Command::Behaviors(cmd) => cmd.execute(&config),
        Command::Catalog(cmd) => cmd.execute(&config),
    }
}

/// Setup logging to stderr and, when asked, to a file
fn setup_logging(config: &TuneConfig, log_file: bool) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    // stdout carries the JSON output
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_dir = config
        .log_dir
        .clone()
        .or_else(|| log_file.then(dirs::log_dir));

    let file_layer = match &log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::never(dir, "tune.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            // Leak the guard to keep file writer alive
            std::mem::forget(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking_file)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = log_dir {
        tracing::debug!("Log file: {}/tune.log", dir.display());
    }
    Ok(())
}
