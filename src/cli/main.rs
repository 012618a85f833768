//! CLI binary entry point for artisan-merge

use anyhow::Context;
use artisan_merge::cli::commands::merge::{MergeArgs, handle_merge};
use artisan_merge::config::sample_config;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive
const LOG_ENV_VAR: &str = "ARTISAN_MERGE_LOG";

#[derive(Parser)]
#[command(name = "artisan-merge")]
#[command(about = "Merge craft batch documents into a lookup document and bulk-load SQL")]
#[command(version)]
struct Cli {
    /// Project root; relative paths resolve against it
    #[arg(short, long, default_value = ".")]
    root: PathBuf,
    /// Config file (default: <root>/.artisan-merge.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory holding batch-*.json documents
    #[arg(long)]
    batch_dir: Option<String>,
    /// Lookup document output path
    #[arg(long)]
    lookup_out: Option<String>,
    /// SQL script output path
    #[arg(long)]
    sql_out: Option<String>,
    /// Target table name
    #[arg(long)]
    table: Option<String>,
    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
    /// Print a sample configuration file and exit
    #[arg(long)]
    print_config: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", sample_config());
        return Ok(());
    }

    init_logging();

    let args = MergeArgs {
        root: cli.root,
        config: cli.config,
        batch_dir: cli.batch_dir,
        lookup_out: cli.lookup_out,
        sql_out: cli.sql_out,
        table: cli.table,
        json: cli.json,
    };

    handle_merge(&args)
        .with_context(|| format!("artisan merge failed for {}", args.root.display()))?;
    Ok(())
}
