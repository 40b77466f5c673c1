//! Candlescope CLI: indicator analysis over saved candle files.
//!
//! Commands:
//! - `analyze`: run one analysis over a JSON or CSV candle file
//! - `batch`: analyse several files in parallel, one report per input
//! - `config`: print the default analysis configuration as TOML

use anyhow::{Context, Result};
use candlescope_core::analysis::{analyze, AnalysisMode, AnalysisReport};
use candlescope_core::config::AnalysisConfig;
use candlescope_core::data::provider_for_path;
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "candlescope",
    about = "Candlescope CLI: technical indicators and momentum labels for candle series"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse one candle file (.csv, or JSON array / broker envelope).
    Analyze {
        /// Candle file to analyse.
        input: PathBuf,

        /// Report mode: full, momentum-only, intraday.
        #[arg(long, default_value = "full")]
        mode: AnalysisMode,

        /// Path to a TOML config file. Defaults to built-in periods.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the JSON report here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON report.
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Analyse several candle files in parallel.
    Batch {
        /// Candle files to analyse.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Report mode: full, momentum-only, intraday.
        #[arg(long, default_value = "full")]
        mode: AnalysisMode,

        /// Path to a TOML config file. Defaults to built-in periods.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for `<stem>.json` reports. Repeated stems get `-2`, `-3`, ...
        #[arg(long, default_value = "reports")]
        output_dir: PathBuf,

        /// Pretty-print the JSON reports.
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Print the default configuration as TOML.
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            mode,
            config,
            output,
            pretty,
        } => run_analyze(&input, mode, config.as_deref(), output.as_deref(), pretty),
        Commands::Batch {
            inputs,
            mode,
            config,
            output_dir,
            pretty,
        } => run_batch(&inputs, mode, config.as_deref(), &output_dir, pretty),
        Commands::Config => run_print_config(),
    }
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(p) => AnalysisConfig::from_file(p)
            .with_context(|| format!("load config {}", p.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

fn analyze_file(input: &Path, config: &AnalysisConfig, mode: AnalysisMode) -> Result<AnalysisReport> {
    let provider = provider_for_path(input);
    let series = provider
        .fetch()
        .with_context(|| format!("load candles from {}", input.display()))?;
    info!(
        input = %input.display(),
        provider = provider.name(),
        candles = series.len(),
        mode = %mode,
        "analysing"
    );
    analyze(&series, config, mode).with_context(|| format!("analyse {}", input.display()))
}

fn render(report: &AnalysisReport, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}

fn run_analyze(
    input: &Path,
    mode: AnalysisMode,
    config: Option<&Path>,
    output: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let config = load_config(config)?;
    let report = analyze_file(input, &config, mode)?;
    let json = render(&report, pretty)?;

    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
            info!(output = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn run_batch(
    inputs: &[PathBuf],
    mode: AnalysisMode,
    config: Option<&Path>,
    output_dir: &Path,
    pretty: bool,
) -> Result<()> {
    let config = load_config(config)?;
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;

    let outputs = report_paths(inputs, output_dir);
    let results: Vec<(&PathBuf, Result<PathBuf>)> = inputs
        .par_iter()
        .zip(outputs.into_par_iter())
        .map(|(input, out)| {
            let written = analyze_file(input, &config, mode).and_then(|report| {
                std::fs::write(&out, render(&report, pretty)?)
                    .with_context(|| format!("write {}", out.display()))?;
                Ok(out)
            });
            (input, written)
        })
        .collect();

    let mut failed = 0;
    for (input, result) in &results {
        match result {
            Ok(out) => println!("  OK: {} -> {}", input.display(), out.display()),
            Err(e) => {
                failed += 1;
                error!(input = %input.display(), "{e:#}");
                println!("  FAIL: {}: {e:#}", input.display());
            }
        }
    }

    let total = results.len();
    println!(
        "\nBatch complete: {}/{total} succeeded, {failed} failed",
        total - failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// One distinct `<stem>.json` path per input, in input order.
fn report_paths(inputs: &[PathBuf], output_dir: &Path) -> Vec<PathBuf> {
    let mut taken = HashSet::new();
    inputs
        .iter()
        .map(|input| {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "report".to_string());
            let mut name = format!("{stem}.json");
            let mut n = 2;
            while !taken.insert(name.clone()) {
                name = format!("{stem}-{n}.json");
                n += 1;
            }
            output_dir.join(name)
        })
        .collect()
}

fn run_print_config() -> Result<()> {
    let toml = AnalysisConfig::default()
        .to_toml()
        .context("render default config")?;
    print!("{toml}");
    Ok(())
}
