//! Delivery Window CLI
//!
//! Per-minute moving average of translation delivery time.

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use delivery_window::{
    config::Config,
    core::WindowSize,
    events::{write_events, EventGenerator},
    pipeline::{compute_stages, load_events, persist},
    preview::{buckets_table, events_table, print_table, windowed_table},
    AggregateError, VERSION,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "delivery-window")]
#[command(version = VERSION)]
#[command(about = "Moving average of translation delivery time per minute", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the moving average for an events file
    Run {
        /// Line-delimited JSON file with translation events
        #[arg(long, short = 'i')]
        input_file: PathBuf,

        /// Window size (in minutes) for the moving average
        #[arg(long, short = 'w', allow_negative_numbers = true)]
        window_size: Option<i64>,

        /// Output file (defaults to <input>_output.<ext> next to the input)
        #[arg(long, short = 'o')]
        output_file: Option<PathBuf>,

        /// Rows shown per preview table
        #[arg(long)]
        preview_rows: Option<usize>,

        /// Skip the console previews
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Generate random translation events for testing
    Generate {
        /// Output file for the generated events
        #[arg(long, short = 'o')]
        output_file: PathBuf,

        /// Number of translations to generate
        #[arg(long, short = 'n', default_value = "1000")]
        nr_translations: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show configuration
    Config,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            input_file,
            window_size,
            output_file,
            preview_rows,
            quiet,
        } => cmd_run(&input_file, window_size, output_file, preview_rows, quiet),
        Commands::Generate {
            output_file,
            nr_translations,
            seed,
        } => cmd_generate(&output_file, nr_translations, seed),
        Commands::Config => cmd_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config() -> Config {
    Config::load().unwrap_or_else(|e| {
        warn!("Could not load config from {:?}: {e}", Config::config_path());
        Config::default()
    })
}

fn cmd_run(
    input_file: &Path,
    window_size: Option<i64>,
    output_file: Option<PathBuf>,
    preview_rows: Option<usize>,
    quiet: bool,
) -> anyhow::Result<()> {
    let config = load_config();

    let window_size = window_size.unwrap_or(i64::from(config.window_size_minutes));
    let window = match WindowSize::new(window_size) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if !input_file.is_file() {
        anyhow::bail!("input file {input_file:?} does not exist");
    }
    let output_file = output_file.unwrap_or_else(|| config.default_output_path(input_file));
    let rows = preview_rows.unwrap_or(config.preview_rows);

    let events = match load_events(input_file) {
        Ok(events) => events,
        Err(e @ AggregateError::InvalidInputFormat { .. }) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("reading {input_file:?}"));
        }
    };

    let stages = match compute_stages(&events, window) {
        Ok(stages) => stages,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if !quiet && !stages.is_empty() {
        print_table("Input file:", &events_table(&events, rows));
        print_table(
            "Events aggregated by minute:",
            &buckets_table(&stages.buckets, rows),
        );
        print_table(
            "Events aggregated by minute and inside window:",
            &windowed_table(&stages.windowed, rows),
        );
        println!();
    }

    let summary = persist(&events, &stages, window, &output_file)
        .with_context(|| format!("writing {output_file:?}"))?;

    if !quiet {
        println!("{}", summary.summary());
    }
    Ok(())
}

fn cmd_generate(
    output_file: &Path,
    nr_translations: usize,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let mut generator = EventGenerator::new(Utc::now().naive_utc(), seed);
    let events = generator.generate(nr_translations);

    if let Some(parent) = output_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {parent:?}"))?;
    }
    let file = File::create(output_file).with_context(|| format!("creating {output_file:?}"))?;
    write_events(BufWriter::new(file), &events)
        .with_context(|| format!("writing {output_file:?}"))?;

    println!("Generated {} events in {:?}", events.len(), output_file);
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    let config = load_config();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).context("serializing configuration")?
    );
    Ok(())
}
