//! Merge command handler

use crate::cli::error::CliError;
use crate::config::MergeConfig;
use crate::merge::RandomIdGenerator;
use crate::pipeline::{RunReport, run};
use std::path::PathBuf;

/// Arguments for the merge command
#[derive(Debug, Clone, Default)]
pub struct MergeArgs {
    /// Project root that relative paths resolve against
    pub root: PathBuf,
    /// Explicit config file; defaults to `<root>/.artisan-merge.toml` when present
    pub config: Option<PathBuf>,
    pub batch_dir: Option<String>,
    pub lookup_out: Option<String>,
    pub sql_out: Option<String>,
    pub table: Option<String>,
    /// Print the run report as JSON instead of text
    pub json: bool,
}

/// Build the effective configuration
///
/// Precedence: command-line flags, then environment, then config file, then defaults.
pub fn resolve_config(args: &MergeArgs) -> Result<MergeConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = MergeConfig::load_file(path)?;
            config.apply_env_overrides();
            config
        }
        None => MergeConfig::load(&args.root)?,
    };

    if let Some(dir) = &args.batch_dir {
        config.input.batch_dir = dir.clone();
    }
    if let Some(path) = &args.lookup_out {
        config.output.lookup_path = path.clone();
    }
    if let Some(path) = &args.sql_out {
        config.output.sql_path = path.clone();
    }
    if let Some(table) = &args.table {
        config.sql.table = table.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Render the run report for the terminal
pub fn format_report(report: &RunReport, json: bool) -> Result<String, CliError> {
    if json {
        return serde_json::to_string_pretty(report)
            .map_err(|e| CliError::SerializationError(e.to_string()));
    }

    let stats = &report.stats;
    let mut lines = vec![format!(
        "✅ Merged {} craft entries from {} batches ({} distinct crafts)",
        stats.crafts_processed, stats.batches, stats.lookup_crafts
    )];
    if stats.overwritten_crafts > 0 {
        lines.push(format!(
            "⚠️  {} craft entries replaced an earlier entry with the same name",
            stats.overwritten_crafts
        ));
    }
    lines.push(format!(
        "   JSON: {} crafts, {} artisans -> {}",
        stats.crafts_processed,
        stats.artisan_rows,
        report.lookup_path.display()
    ));
    lines.push(format!(
        "   SQL: {} rows in {} INSERT statements -> {}",
        stats.artisan_rows,
        stats.insert_statements,
        report.sql_path.display()
    ));
    Ok(lines.join("\n"))
}

/// Handle the merge command
pub fn handle_merge(args: &MergeArgs) -> Result<RunReport, CliError> {
    if !args.root.is_dir() {
        return Err(CliError::RootNotFound(args.root.clone()));
    }

    let config = resolve_config(args)?;
    let report = run(&config, &args.root, RandomIdGenerator)?;

    println!("{}", format_report(&report, args.json)?);
    Ok(report)
}
