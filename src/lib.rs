//! dataset-loader: load datasets from disk or the Hugging Face Hub.
//!
//! A single facade, [`DatasetLoader`], routes a load request to one of three
//! strategies: a local CSV file, a local JSON file, or a named dataset split
//! on the hub. Local files come back either as a polars [`DataFrame`] or as
//! a split-aware [`HubDataset`]; hub datasets always come back as a
//! [`HubDataset`].
//!
//! ```no_run
//! use dataset_loader::{DatasetLoader, LoadOptions};
//!
//! let loader = DatasetLoader::new();
//! let frame = loader
//!     .load(true, LoadOptions::local("data.csv").with_load_as_table(true))?
//!     .into_table();
//! let imdb = loader.load(false, LoadOptions::remote("imdb").with_split("test"))?;
//! # Ok::<(), dataset_loader::LoaderError>(())
//! ```
//!
//! # Modules
//!
//! - [`loader`]: the facade and its result type
//! - [`options`]: typed load options and the untyped map boundary
//! - [`dataset`]: the hub-native dataset handle
//! - [`table`]: polars-backed readers
//! - [`hub`]: dataset reference resolution, split file selection, hub client
//! - [`report`]: CLI summaries
//! - [`error`]: error types
//!
//! [`DataFrame`]: polars::prelude::DataFrame

pub mod dataset;
pub mod error;
pub mod hub;
pub mod loader;
pub mod options;
pub mod report;
pub mod table;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use env_logger::Env;

pub use dataset::{DataFileFormat, DatasetSplit, HubDataset};
pub use error::LoaderError;
pub use loader::{DatasetLoader, Diagnostics, Loaded, LogDiagnostics};
pub use options::{
    DatasetType, HubOptions, LoadOptions, LocalFileOptions, ReaderOptions, RemoteOptions, Split,
};

use report::{LoadReport, TableSummary};

/// The dataset-loader CLI application.
#[derive(Parser)]
#[command(name = "dataset-loader")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log filter (overrides RUST_LOG), e.g. 'debug'.
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Load a local CSV or JSON file.
    Local(LocalArgs),
    /// Fetch one split of a dataset from the Hugging Face Hub.
    Remote(RemoteArgs),
}

/// Flags shared by both subcommands.
#[derive(clap::Args)]
struct CommonArgs {
    /// YAML or JSON file with load options; flags override its values.
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Print the first N rows of a loaded table.
    #[arg(long, value_name = "N")]
    head: Option<usize>,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the local subcommand.
#[derive(clap::Args)]
struct LocalArgs {
    /// Path to the data file.
    path: Option<PathBuf>,

    /// Dataset type ('csv' or 'json').
    #[arg(long = "type", value_name = "TYPE")]
    dataset_type: Option<String>,

    /// Load as a table instead of a dataset handle.
    #[arg(long)]
    table: bool,

    #[command(flatten)]
    common: CommonArgs,
}

/// Arguments for the remote subcommand.
#[derive(clap::Args)]
struct RemoteArgs {
    /// Dataset name, repo id, or huggingface.co dataset URL.
    dataset: Option<String>,

    /// Split to fetch ('train', 'test' or 'validation').
    #[arg(long)]
    split: Option<String>,

    /// Branch, tag or commit.
    #[arg(long)]
    revision: Option<String>,

    /// Dataset configuration (subset) directory.
    #[arg(long)]
    config: Option<String>,

    /// Hub access token.
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Hub download cache directory.
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Read the fetched split into a table.
    #[arg(long)]
    table: bool,

    #[command(flatten)]
    common: CommonArgs,
}

/// Run the dataset-loader CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), LoaderError> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = cli.log_level.as_deref() {
        logger.parse_filters(level);
    }
    logger.init();

    match cli.command {
        Some(Commands::Local(args)) => run_local(args),
        Some(Commands::Remote(args)) => run_remote(args),
        None => {
            println!("dataset-loader {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Load datasets from local files or the Hugging Face Hub.");
            println!();
            println!("Run 'dataset-loader --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the local subcommand.
fn run_local(args: LocalArgs) -> Result<(), LoaderError> {
    let flags = LoadOptions {
        dataset_type: args.dataset_type,
        path: args.path,
        load_as_table: args.table,
        ..Default::default()
    };
    let options = read_options_file(args.common.options.as_deref())?.merge(flags);

    let loaded = DatasetLoader::new().load(true, options)?;
    print_report(
        &LoadReport::from_loaded(&loaded, args.common.head),
        &args.common.output,
    )
}

/// Execute the remote subcommand.
fn run_remote(args: RemoteArgs) -> Result<(), LoaderError> {
    let flags = LoadOptions {
        dataset_name: args.dataset,
        split: args.split,
        hub: HubOptions {
            revision: args.revision,
            config: args.config,
            token: args.token,
            cache_dir: args.cache_dir,
        },
        ..Default::default()
    };
    let options = read_options_file(args.common.options.as_deref())?.merge(flags);
    let split: Split = options
        .split
        .as_deref()
        .unwrap_or(options::DEFAULT_SPLIT)
        .parse()?;

    let loaded = DatasetLoader::new().load(false, options)?;

    let report = match (args.table, loaded) {
        (true, Loaded::Dataset(dataset)) => {
            let repo_id = dataset.name().to_string();
            let data = dataset
                .into_split(split)
                .ok_or_else(|| LoaderError::SplitNotFound {
                    repo_id,
                    split: split.to_string(),
                })?;
            LoadReport::Table(TableSummary::from_frame(
                &data.to_table()?,
                args.common.head,
            ))
        }
        (_, loaded) => LoadReport::from_loaded(&loaded, args.common.head),
    };
    print_report(&report, &args.common.output)
}

/// Read load options from a YAML (`.yaml`/`.yml`) or JSON file.
fn read_options_file(path: Option<&Path>) -> Result<LoadOptions, LoaderError> {
    let Some(path) = path else {
        return Ok(LoadOptions::default());
    };

    let config_error = |message: String| LoaderError::Config {
        path: path.to_path_buf(),
        message,
    };

    let text = std::fs::read_to_string(path).map_err(|source| config_error(source.to_string()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "yaml" | "yml"))
        .unwrap_or(false);

    if is_yaml {
        serde_yaml::from_str(&text).map_err(|source| config_error(source.to_string()))
    } else {
        serde_json::from_str(&text).map_err(|source| config_error(source.to_string()))
    }
}

fn print_report(report: &LoadReport, output: &str) -> Result<(), LoaderError> {
    match output {
        "json" => {
            let json = serde_json::to_string_pretty(report)
                .map_err(|source| LoaderError::Io(source.into()))?;
            println!("{json}");
        }
        _ => print!("{report}"),
    }
    Ok(())
}
