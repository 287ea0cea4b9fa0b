//! moldata Command Line Interface
//!
//! A command-line interface for inspecting molecular-property CSV datasets
//! and splitting them into shuffled chunks.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{error, info};
use moldata::api::DatasetLoader;
use moldata::core::{DatasetType, Result};
use moldata::data::write_csv;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "moldata")]
#[command(about = "Molecular-property dataset inspection and splitting")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "moldata contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a dataset: molecules, tasks, target coverage
    Inspect(InspectArgs),
    /// Shuffle a dataset and split it into chunk CSV files
    Split(SplitArgs),
}

#[derive(Args)]
struct InspectArgs {
    /// Dataset CSV file
    #[arg(long)]
    data: PathBuf,

    /// Rows start with a compound name column
    #[arg(long)]
    compound_names: bool,

    /// Dataset kind
    #[arg(long, default_value = "regression")]
    dataset_type: CliDatasetType,
}

#[derive(Args)]
struct SplitArgs {
    /// Dataset CSV file
    #[arg(long)]
    data: PathBuf,

    /// Number of chunks to produce
    #[arg(short, long)]
    num_chunks: usize,

    /// Shuffle seed for a reproducible split
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output directory for chunk_N.csv files
    #[arg(short, long)]
    output: PathBuf,

    /// Rows start with a compound name column
    #[arg(long)]
    compound_names: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliDatasetType {
    /// Continuous targets
    #[value(name = "regression")]
    Regression,
    /// Binary or categorical targets
    #[value(name = "classification")]
    Classification,
    /// No supervised labels
    #[value(name = "unsupervised")]
    Unsupervised,
}

impl From<CliDatasetType> for DatasetType {
    fn from(cli_type: CliDatasetType) -> Self {
        match cli_type {
            CliDatasetType::Regression => DatasetType::Regression,
            CliDatasetType::Classification => DatasetType::Classification,
            CliDatasetType::Unsupervised => DatasetType::Unsupervised,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Inspect(args) => inspect_command(args),
        Commands::Split(args) => split_command(args),
    };

    if let Err(e) = result {
        error!("Command failed: {e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn inspect_command(args: InspectArgs) -> Result<()> {
    info!("Inspecting dataset {:?}", args.data);

    let dataset = DatasetLoader::new()
        .with_compound_names(args.compound_names)
        .with_dataset_type(args.dataset_type.into())
        .load_from_file(&args.data)?;

    let num_tasks = dataset.num_tasks()?;

    println!("=== Dataset Summary ===");
    println!("File: {:?}", args.data);
    println!("Molecules: {}", dataset.len());
    println!("Tasks: {num_tasks}");
    println!(
        "Compound names: {}",
        if dataset.compound_names().is_some() {
            "yes"
        } else {
            "no"
        }
    );

    for task in 0..num_tasks {
        let present = dataset
            .iter()
            .filter(|d| matches!(d.targets.get(task), Ok(Some(_))))
            .count();
        let coverage = present as f64 / dataset.len() as f64 * 100.0;
        println!("Task {task}: {present}/{} targets present ({coverage:.1}%)", dataset.len());
    }

    Ok(())
}

fn split_command(args: SplitArgs) -> Result<()> {
    info!(
        "Splitting {:?} into {} chunks (seed: {:?})",
        args.data, args.num_chunks, args.seed
    );

    let dataset = DatasetLoader::new()
        .with_compound_names(args.compound_names)
        .load_from_file(&args.data)?;
    let total = dataset.len();

    std::fs::create_dir_all(&args.output)?;

    let chunks = dataset.chunk(args.num_chunks, args.seed)?;
    for (i, chunk) in chunks.iter().enumerate() {
        let path = args.output.join(format!("chunk_{i}.csv"));
        if chunk.is_empty() {
            info!("Chunk {i} is empty, skipping {path:?}");
            continue;
        }
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        write_csv(chunk, &mut writer)?;
        println!("Wrote {} molecules to {path:?}", chunk.len());
    }

    println!("Split {total} molecules into {} chunks", args.num_chunks);
    Ok(())
}
