//! The dataset loading facade.
//!
//! [`DatasetLoader::load`] is a flat two-level dispatch:
//!
//! ```text
//! local?
//!  ├─ yes: dataset_type
//!  │        ├─ csv  -> load_local_csv  -> table | load_as_dataset
//!  │        └─ json -> load_local_json -> table | load_as_dataset
//!  └─ no:  load_remote -> hub dataset restricted to one split
//! ```
//!
//! Required arguments and tags are checked before any file or network
//! access. The loader keeps no state between calls; its fields are the
//! collaborators it was built with.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use log::{debug, error};
use polars::prelude::DataFrame;
use serde_json::{Map, Value};

use crate::dataset::HubDataset;
use crate::error::LoaderError;
use crate::hub::resolve::parse_dataset_ref;
use crate::hub::select::select_split_files;
use crate::hub::{HfHubClient, HubClient};
use crate::options::{
    DatasetType, LoadOptions, LocalFileOptions, ReaderOptions, RemoteOptions, Split,
    DEFAULT_SPLIT,
};
use crate::table;

/// Receives failures the loader reports before returning them.
pub trait Diagnostics: Send + Sync {
    fn report(&self, error: &LoaderError);
}

/// [`Diagnostics`] that writes to the `log` facade at error level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, err: &LoaderError) {
        error!("{err}");
    }
}

/// Result of a load: a tabular frame or a hub-native dataset.
#[derive(Clone, Debug, PartialEq)]
pub enum Loaded {
    Table(DataFrame),
    Dataset(HubDataset),
}

impl Loaded {
    pub fn is_table(&self) -> bool {
        matches!(self, Loaded::Table(_))
    }

    pub fn as_table(&self) -> Option<&DataFrame> {
        match self {
            Loaded::Table(df) => Some(df),
            Loaded::Dataset(_) => None,
        }
    }

    pub fn as_dataset(&self) -> Option<&HubDataset> {
        match self {
            Loaded::Dataset(dataset) => Some(dataset),
            Loaded::Table(_) => None,
        }
    }

    pub fn into_table(self) -> Option<DataFrame> {
        match self {
            Loaded::Table(df) => Some(df),
            Loaded::Dataset(_) => None,
        }
    }

    pub fn into_dataset(self) -> Option<HubDataset> {
        match self {
            Loaded::Dataset(dataset) => Some(dataset),
            Loaded::Table(_) => None,
        }
    }
}

/// Loads datasets from local CSV/JSON files or the Hugging Face Hub.
#[derive(Clone)]
pub struct DatasetLoader {
    hub: Arc<dyn HubClient>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self {
            hub: Arc::new(HfHubClient),
            diagnostics: Arc::new(LogDiagnostics),
        }
    }
}

impl fmt::Debug for DatasetLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetLoader").finish_non_exhaustive()
    }
}

impl DatasetLoader {
    /// A loader using the public hub and the `log` facade.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hub_client(mut self, hub: impl HubClient + 'static) -> Self {
        self.hub = Arc::new(hub);
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: impl Diagnostics + 'static) -> Self {
        self.diagnostics = Arc::new(diagnostics);
        self
    }

    /// Load a dataset.
    ///
    /// With `local`, `options.dataset_type` (default `csv`) picks the CSV or
    /// JSON strategy. Otherwise the remote strategy fetches
    /// `options.dataset_name` at `options.split` (default `train`).
    ///
    /// # Errors
    /// - [`LoaderError::UnsupportedType`] for a local type other than csv/json
    /// - [`LoaderError::MissingArgument`] when `path` or `dataset_name` is absent
    /// - [`LoaderError::FileNotFound`] for a missing file (non-table mode)
    /// - parser and hub errors, unchanged
    pub fn load(&self, local: bool, options: LoadOptions) -> Result<Loaded, LoaderError> {
        if local {
            let dataset_type = options.dataset_type()?;
            debug!("local {dataset_type} request");
            let opts = options.into_local();
            match dataset_type {
                DatasetType::Csv => self.load_local_csv(opts),
                DatasetType::Json => self.load_local_json(opts),
            }
        } else {
            // Read for the log line only; the remote strategy applies it.
            let split = options.split.as_deref().unwrap_or(DEFAULT_SPLIT);
            debug!(
                "remote request for '{}' ({split})",
                options.dataset_name.as_deref().unwrap_or_default()
            );
            self.load_remote(options.into_remote())
                .map(Loaded::Dataset)
        }
    }

    /// [`load`](Self::load) with options given as an untyped map.
    pub fn load_from_map(
        &self,
        local: bool,
        options: Map<String, Value>,
    ) -> Result<Loaded, LoaderError> {
        self.load(local, LoadOptions::from_map(options)?)
    }

    /// Load a local CSV file as a frame or a dataset.
    pub fn load_local_csv(&self, opts: LocalFileOptions) -> Result<Loaded, LoaderError> {
        self.load_local(DatasetType::Csv, opts)
    }

    /// Load a local JSON or JSON Lines file as a frame or a dataset.
    pub fn load_local_json(&self, opts: LocalFileOptions) -> Result<Loaded, LoaderError> {
        self.load_local(DatasetType::Json, opts)
    }

    fn load_local(
        &self,
        dataset_type: DatasetType,
        opts: LocalFileOptions,
    ) -> Result<Loaded, LoaderError> {
        let path = opts.path.ok_or(LoaderError::MissingArgument("path"))?;

        if opts.load_as_table {
            let frame = match dataset_type {
                DatasetType::Csv => table::read_csv(&path, &opts.reader)?,
                DatasetType::Json => table::read_json(&path, &opts.reader)?,
            };
            return Ok(Loaded::Table(frame));
        }

        table::validate_options(dataset_type.into(), &opts.reader)?;
        self.checked_dataset(&path, dataset_type, opts.reader)
            .map(Loaded::Dataset)
    }

    /// Wrap an existing local file as a hub-native dataset.
    ///
    /// # Errors
    /// [`LoaderError::FileNotFound`] if `path` does not exist. The error is
    /// handed to the diagnostics sink before it is returned.
    pub fn load_as_dataset(
        &self,
        path: &Path,
        dataset_type: DatasetType,
    ) -> Result<HubDataset, LoaderError> {
        self.checked_dataset(path, dataset_type, ReaderOptions::default())
    }

    fn checked_dataset(
        &self,
        path: &Path,
        dataset_type: DatasetType,
        reader: ReaderOptions,
    ) -> Result<HubDataset, LoaderError> {
        if path.exists() {
            return Ok(HubDataset::from_local_file(dataset_type, path, reader));
        }

        let err = LoaderError::FileNotFound(path.to_path_buf());
        self.diagnostics.report(&err);
        Err(err)
    }

    /// Fetch one split of a hub dataset.
    ///
    /// # Errors
    /// [`LoaderError::MissingArgument`] without a dataset name and
    /// [`LoaderError::UnsupportedSplit`] for an unknown split, both before
    /// any network access; [`LoaderError::SplitNotFound`] when the
    /// repository has no data files for the split; reader option errors
    /// for the selected format before any download; hub errors unchanged.
    pub fn load_remote(&self, opts: RemoteOptions) -> Result<HubDataset, LoaderError> {
        let name = opts
            .dataset_name
            .ok_or(LoaderError::MissingArgument("dataset_name"))?;
        let split: Split = opts
            .split
            .as_deref()
            .unwrap_or(DEFAULT_SPLIT)
            .parse()?;
        let repo = parse_dataset_ref(
            &name,
            opts.hub.revision.as_deref(),
            opts.hub.config.as_deref(),
        )?;

        let listing = self.hub.list_files(&repo, &opts.hub)?;
        let selected = select_split_files(&listing, split, repo.config.as_deref()).ok_or_else(
            || LoaderError::SplitNotFound {
                repo_id: repo.repo_id.clone(),
                split: split.to_string(),
            },
        )?;
        debug!(
            "{} {split}: {} {} file(s)",
            repo.repo_id,
            selected.files.len(),
            selected.format
        );
        table::validate_options(selected.format, &opts.reader)?;

        let files = self.hub.fetch_files(&repo, &selected.files, &opts.hub)?;
        Ok(HubDataset::from_hub_files(
            &repo,
            selected.format,
            split,
            files,
            opts.reader,
        ))
    }
}
