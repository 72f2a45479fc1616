//! Hub-native dataset handle.
//!
//! A [`HubDataset`] is what the hub's dataset library hands back: a named
//! dataset with one or more splits, each backed by data files on local disk.
//! Rows are not read until a split is materialized with
//! [`DatasetSplit::to_table`].
//!
//! Local files loaded without `load_as_table` become a dataset named after
//! the generic builder (`csv` or `json`) with a single `train` split, which is
//! how the hub's generic file builders expose a lone data file.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use serde::Serialize;

use crate::error::LoaderError;
use crate::hub::HfRepoRef;
use crate::options::{DatasetType, ReaderOptions, Split};
use crate::table;

/// Physical format of a dataset's data files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFileFormat {
    Parquet,
    Csv,
    Json,
}

impl DataFileFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "parquet" => Some(DataFileFormat::Parquet),
            "csv" => Some(DataFileFormat::Csv),
            "json" | "jsonl" | "ndjson" => Some(DataFileFormat::Json),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DataFileFormat::Parquet => "parquet",
            DataFileFormat::Csv => "csv",
            DataFileFormat::Json => "json",
        }
    }
}

impl From<DatasetType> for DataFileFormat {
    fn from(value: DatasetType) -> Self {
        match value {
            DatasetType::Csv => DataFileFormat::Csv,
            DatasetType::Json => DataFileFormat::Json,
        }
    }
}

impl fmt::Display for DataFileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One split of a [`HubDataset`].
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetSplit {
    split: Split,
    format: DataFileFormat,
    files: Vec<PathBuf>,
    reader: ReaderOptions,
}

impl DatasetSplit {
    pub fn split(&self) -> Split {
        self.split
    }

    pub fn format(&self) -> DataFileFormat {
        self.format
    }

    /// Local paths of the data files, in read order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Read every data file of the split into one frame.
    pub fn to_table(&self) -> Result<DataFrame, LoaderError> {
        table::read_tables(self.format, &self.files, &self.reader)
    }
}

/// A dataset as exposed by the hub: named, split-aware, lazily read.
#[derive(Clone, Debug, PartialEq)]
pub struct HubDataset {
    name: String,
    revision: Option<String>,
    format: DataFileFormat,
    splits: BTreeMap<Split, DatasetSplit>,
}

impl HubDataset {
    /// A dataset wrapping a single local file as its `train` split.
    pub(crate) fn from_local_file(
        dataset_type: DatasetType,
        path: &Path,
        reader: ReaderOptions,
    ) -> Self {
        Self::single_split(
            dataset_type.as_str().to_string(),
            None,
            dataset_type.into(),
            Split::Train,
            vec![path.to_path_buf()],
            reader,
        )
    }

    /// A dataset holding the downloaded files of one hub split.
    pub(crate) fn from_hub_files(
        repo: &HfRepoRef,
        format: DataFileFormat,
        split: Split,
        files: Vec<PathBuf>,
        reader: ReaderOptions,
    ) -> Self {
        Self::single_split(
            repo.repo_id.clone(),
            repo.revision.clone(),
            format,
            split,
            files,
            reader,
        )
    }

    fn single_split(
        name: String,
        revision: Option<String>,
        format: DataFileFormat,
        split: Split,
        files: Vec<PathBuf>,
        reader: ReaderOptions,
    ) -> Self {
        let data = DatasetSplit {
            split,
            format,
            files,
            reader,
        };
        Self {
            name,
            revision,
            format,
            splits: BTreeMap::from([(split, data)]),
        }
    }

    /// Builder name for local files, repository id for hub datasets.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    pub fn format(&self) -> DataFileFormat {
        self.format
    }

    pub fn split_names(&self) -> Vec<Split> {
        self.splits.keys().copied().collect()
    }

    pub fn split(&self, split: Split) -> Option<&DatasetSplit> {
        self.splits.get(&split)
    }

    pub fn splits(&self) -> impl Iterator<Item = &DatasetSplit> {
        self.splits.values()
    }

    pub fn into_split(mut self, split: Split) -> Option<DatasetSplit> {
        self.splits.remove(&split)
    }
}
