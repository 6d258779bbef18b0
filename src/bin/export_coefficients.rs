use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use firoffload::config::EqualizerConfig;
use firoffload::signal_processing::{FilterKind, export_block};
use firoffload::FilterCatalog;

#[derive(Parser, Debug)]
#[command(name = "export_coefficients")]
#[command(about = "Print catalog FIR coefficients for the accelerator configuration tool", long_about = None)]
struct Args {
    /// Filters to export (default: all)
    #[arg(value_enum)]
    filters: Vec<FilterKind>,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &args.config {
        Some(path) => EqualizerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EqualizerConfig::default(),
    };
    let catalog = FilterCatalog::from_config(&config.catalog).context("Invalid filter catalog")?;

    let filters = if args.filters.is_empty() {
        FilterKind::ALL.to_vec()
    } else {
        args.filters
    };

    let mut text = String::new();
    for kind in filters {
        let entry = catalog
            .get(kind)
            .with_context(|| format!("{} is not in the catalog", kind))?;
        text.push_str(&export_block(kind, entry.taps.taps()));
    }

    match args.output {
        Some(path) => {
            fs::write(&path, &text).with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote coefficients to {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
