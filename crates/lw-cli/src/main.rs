//! LumiWeight CLI

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use lw_samples::{build_sample_with, Catalog, CombineMode, DirectLoader, SampleCollection};

#[derive(Parser)]
#[command(name = "lumiweight")]
#[command(about = "LumiWeight - luminosity-weighted sample bookkeeping")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report effective luminosities from a dataset catalog
    Report {
        /// Catalog file (JSON luminosity map)
        #[arg(short, long)]
        catalog: PathBuf,

        /// Combine the listed datasets under this mode (add or merge)
        #[arg(long, default_value = "add")]
        mode: CombineMode,

        /// Datasets to combine (comma separated). Defaults to every
        /// dataset in the catalog.
        #[arg(long, value_delimiter = ',')]
        datasets: Vec<String>,

        /// Output file for the report (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compute per-source event weights for a target luminosity
    Weights {
        /// Catalog file (JSON luminosity map)
        #[arg(short, long)]
        catalog: PathBuf,

        /// Name of the combined collection
        #[arg(long, default_value = "combined")]
        name: String,

        /// Combination mode (add or merge)
        #[arg(long)]
        mode: CombineMode,

        /// Datasets to combine (comma separated)
        #[arg(long, value_delimiter = ',', required = true)]
        datasets: Vec<String>,

        /// Target integrated luminosity. Defaults to the collection's
        /// own effective luminosity (no rescaling).
        #[arg(long)]
        target_lumi: Option<f64>,

        /// Read only 1-in-N events from each source (extra prescale)
        #[arg(long, default_value = "1")]
        take_every: u32,

        /// Output file for the weight table (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct DatasetReport {
    name: String,
    int_lumi: f64,
    prescale: f64,
    effective_luminosity: f64,
}

#[derive(Serialize)]
struct Report {
    datasets: Vec<DatasetReport>,
    mode: String,
    combined_effective_luminosity: f64,
}

#[derive(Serialize)]
struct WeightRow {
    sample: String,
    files: Vec<PathBuf>,
    weight: f64,
}

#[derive(Serialize)]
struct WeightTable {
    name: String,
    mode: String,
    effective_luminosity: f64,
    target_luminosity: f64,
    sources: Vec<WeightRow>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Report { catalog, mode, datasets, output } => {
            run_report(&catalog, mode, &datasets, output.as_deref())
        }
        Commands::Weights {
            catalog,
            name,
            mode,
            datasets,
            target_lumi,
            take_every,
            output,
        } => run_weights(
            &catalog,
            &name,
            mode,
            &datasets,
            target_lumi,
            take_every,
            output.as_deref(),
        ),
    }
}

fn load_collection(
    catalog_path: &std::path::Path,
    name: &str,
    mode: CombineMode,
    datasets: &[String],
    take_every: u32,
) -> Result<(Catalog, SampleCollection)> {
    let catalog = Catalog::from_path(catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;
    let requested: Vec<&str> = if datasets.is_empty() {
        catalog.datasets.keys().map(String::as_str).collect()
    } else {
        datasets.iter().map(String::as_str).collect()
    };
    let collection = build_sample_with(&DirectLoader, &catalog, name, mode, &requested, take_every)
        .with_context(|| format!("building collection '{}'", name))?;
    Ok((catalog, collection))
}

fn run_report(
    catalog_path: &std::path::Path,
    mode: CombineMode,
    datasets: &[String],
    output: Option<&std::path::Path>,
) -> Result<()> {
    let (catalog, collection) = load_collection(catalog_path, "report", mode, datasets, 1)?;
    tracing::info!(
        datasets = collection.members().len(),
        effective_luminosity = collection.effective_luminosity(),
        "catalog report"
    );

    let names: Vec<&str> = if datasets.is_empty() {
        catalog.datasets.keys().map(String::as_str).collect()
    } else {
        datasets.iter().map(String::as_str).collect()
    };
    let rows = names
        .iter()
        .map(|&name| {
            // load_collection already verified every name resolves.
            let entry = catalog.get(name).expect("dataset vetted during build");
            DatasetReport {
                name: name.to_owned(),
                int_lumi: entry.int_lumi,
                prescale: entry.prescale,
                effective_luminosity: entry.int_lumi / entry.prescale,
            }
        })
        .collect();

    let report = Report {
        datasets: rows,
        mode: mode.to_string(),
        combined_effective_luminosity: collection.effective_luminosity(),
    };
    write_json(&report, output)
}

fn run_weights(
    catalog_path: &std::path::Path,
    name: &str,
    mode: CombineMode,
    datasets: &[String],
    target_lumi: Option<f64>,
    take_every: u32,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let (_, collection) = load_collection(catalog_path, name, mode, datasets, take_every)?;

    let effective = collection.effective_luminosity();
    let target = target_lumi.unwrap_or(effective);
    let sources = collection
        .events_and_weights(target_lumi)?
        .into_iter()
        .map(|ws| WeightRow {
            sample: ws.name.to_owned(),
            files: ws.source.files().to_vec(),
            weight: ws.weight,
        })
        .collect();

    let table = WeightTable {
        name: name.to_owned(),
        mode: mode.to_string(),
        effective_luminosity: effective,
        target_luminosity: target,
        sources,
    };
    write_json(&table, output)
}

fn write_json<T: Serialize>(value: &T, output: Option<&std::path::Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{}", text),
    }
    Ok(())
}
