use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rdk_config::{load_layered_yaml, strategy_config};
use rdk_testkit::{load_bars_csv, run_replay};

#[derive(Parser)]
#[command(name = "rdk")]
#[command(about = "RangeDesk consolidation engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> env -> strategy overrides)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Replay a CSV bar series through the strategy and print the intent log
    Replay {
        /// Layered config paths in merge order
        #[arg(long = "config", required = true)]
        config_paths: Vec<String>,

        /// CSV file of bars (symbol,end_ts,open,high,low,close,volume,is_complete)
        #[arg(long)]
        bars: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::ConfigHash { paths } => cmd_config_hash(&paths),
        Commands::Replay { config_paths, bars } => cmd_replay(&config_paths, &bars),
    }
}

fn cmd_config_hash(paths: &[String]) -> Result<()> {
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = load_layered_yaml(&path_refs).context("config load failed")?;

    println!("config_hash: {}", loaded.config_hash);
    println!("{}", loaded.canonical_json);
    Ok(())
}

fn cmd_replay(config_paths: &[String], bars_path: &PathBuf) -> Result<()> {
    let path_refs: Vec<&str> = config_paths.iter().map(|s| s.as_str()).collect();
    let loaded = load_layered_yaml(&path_refs).context("config load failed")?;
    let cfg = strategy_config(&loaded).context("strategy config invalid")?;

    let rows = load_bars_csv(bars_path).context("bars csv load failed")?;
    let report = run_replay(cfg, &loaded.config_hash, &rows).context("replay failed")?;

    // One JSON line per intent (pipe-friendly), then the report envelope.
    for intent in &report.intents {
        println!("{}", serde_json::to_string(intent)?);
    }
    eprintln!(
        "replayed {} bars ({} skipped), {} intents, run_id={}",
        report.bars_processed,
        report.bars_skipped,
        report.intents.len(),
        report.run_id
    );
    Ok(())
}
