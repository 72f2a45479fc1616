use std::path::PathBuf;
use thiserror::Error;

/// The main error type for dataset-loader operations.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Dataset type {0} not supported (supported: csv, json)")]
    UnsupportedType(String),

    #[error("Required argument '{0}' not provided")]
    MissingArgument(&'static str),

    #[error("File {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("Split '{0}' not supported (supported: train, test, validation)")]
    UnsupportedSplit(String),

    #[error("Invalid load options: {0}")]
    InvalidOptions(#[source] serde_json::Error),

    #[error("Invalid value for option '{key}': {message}")]
    InvalidOption { key: String, message: String },

    #[error("Option '{key}' is not understood by the {reader} reader")]
    UnsupportedOption { key: String, reader: &'static str },

    #[error("Failed to resolve dataset reference '{input}': {message}")]
    HubResolve { input: String, message: String },

    #[error("No data files for split '{split}' in dataset '{repo_id}'")]
    SplitNotFound { repo_id: String, split: String },

    #[error("Failed to read options file {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Table(#[from] polars::prelude::PolarsError),

    #[error(transparent)]
    Hub(#[from] hf_hub::api::sync::ApiError),
}
