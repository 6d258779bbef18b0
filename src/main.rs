use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use firoffload::audio;
use firoffload::config::EqualizerConfig;
use firoffload::offload::{
    AcceleratorBinding, LogProgress, OffloadSession, ResultStore, SoftwareChannel,
};
use firoffload::output::{OutputFormat, RunSummary, create_formatter};
use firoffload::signal_processing::{FilterKind, crossings, export_block, magnitude_db};
use firoffload::wav::save_wav;

#[derive(Parser, Debug)]
#[command(name = "firoffload")]
#[command(about = "Design FIR filters and apply them to WAV files through an accelerator channel", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available filters and their accelerator configurations
    List,

    /// Print a filter's coefficients and a summary of its response
    Design {
        /// Filter to design
        #[arg(value_enum)]
        filter: FilterKind,
    },

    /// Apply one or more filters to a WAV file
    Apply {
        /// Input WAV file (multi-channel files use channel 0)
        input: PathBuf,

        /// Filters to apply, in order
        #[arg(value_enum, required = true)]
        filters: Vec<FilterKind>,

        /// Directory for out_<Filter>.wav files (overrides config)
        #[arg(short = 'o', long)]
        out_dir: Option<PathBuf>,

        /// Run each filter this many times and report timing statistics
        #[arg(short = 'r', long, default_value = "1")]
        repeat: usize,

        /// Report format: text, json, csv
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Do not write output files
        #[arg(long)]
        no_write: bool,
    },
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

    let session = OffloadSession::from_config(&config).context("Invalid filter catalog")?;

    match args.command {
        Command::List => {
            for entry in session.catalog().iter() {
                println!(
                    "{:<9}  {:?} Hz  {} taps  -> {}",
                    entry.spec.kind().as_str(),
                    entry.spec.cutoffs(),
                    entry.spec.tap_count(),
                    entry.config_token
                );
            }
        }
        Command::Design { filter } => print_design(&session, filter)?,
        Command::Apply {
            input,
            filters,
            out_dir,
            repeat,
            format,
            no_write,
        } => {
            let mut output = config.output.clone();
            if let Some(dir) = out_dir {
                output.directory = dir;
            }

            let buffer = audio::load(&input)
                .with_context(|| format!("Failed to load {}", input.display()))?;
            println!("Status: {}", buffer.summary());

            let mut channel = SoftwareChannel::new(session.catalog().clone());
            let mut binding = AcceleratorBinding::new();
            let mut store = ResultStore::new();
            let formatter = create_formatter(format, args.verbose > 0);
            if let Some(header) = formatter.header() {
                println!("{}", header);
            }

            for filter in filters {
                let (result, durations) = match session.run_repeated(
                    Some(&buffer),
                    filter.as_str(),
                    repeat,
                    &mut channel,
                    &mut binding,
                    &mut LogProgress,
                ) {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        eprintln!("Status: {}: Error: {}", filter, e);
                        continue;
                    }
                };

                let output_file = if no_write {
                    None
                } else {
                    let path = output.path_for(filter);
                    save_wav(&path, result.sample_rate(), result.samples())
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    Some(path)
                };
                println!(
                    "{}",
                    formatter.format(&RunSummary::new(&result, &durations, output_file))
                );
                store.put(filter, result);
            }
            log::debug!("{} filtered results held", store.len());
        }
    }

    Ok(())
}

fn print_design(session: &OffloadSession, filter: FilterKind) -> anyhow::Result<()> {
    let entry = session
        .catalog()
        .get(filter)
        .with_context(|| format!("{} is not in the catalog", filter))?;
    let taps = entry.taps.taps();
    let rate = entry.spec.sample_rate();

    print!("{}", export_block(filter, taps));
    println!();
    println!("Taps: {}  group delay: {} samples", taps.len(), entry.taps.group_delay_samples());
    println!("Design cutoffs: {:?} Hz  Kaiser beta: {}", entry.spec.cutoffs(), entry.spec.window_param());
    println!("DC gain: {:.6}", entry.taps.dc_gain());

    let edges = crossings(taps, rate, -3.0, 4801);
    let edges: Vec<String> = edges.iter().map(|f| format!("{:.0}", f)).collect();
    println!("-3 dB crossings: {} Hz", edges.join(", "));

    for freq in [100.0, 400.0, 1000.0, 2000.0, 5000.0, 10000.0] {
        println!("  {:>6.0} Hz: {:>7.2} dB", freq, magnitude_db(taps, freq, rate));
    }
    Ok(())
}
