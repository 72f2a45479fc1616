//! Load request options.
//!
//! A load request arrives either as a typed [`LoadOptions`] or as an untyped
//! string-keyed map (see [`LoadOptions::from_map`]). Known keys are typed
//! fields; anything else is kept in [`ReaderOptions::extra`] and forwarded to
//! the tabular reader untouched.
//!
//! The facade splits a request into per-strategy option structs:
//! [`LocalFileOptions`] for the CSV/JSON strategies and [`RemoteOptions`] for
//! the hub strategy.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LoaderError;

/// Dataset type used when a local request does not name one.
pub const DEFAULT_DATASET_TYPE: &str = "csv";

/// Split used when a remote request does not name one.
pub const DEFAULT_SPLIT: &str = "train";

/// File type tag for the local strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetType {
    Csv,
    Json,
}

impl DatasetType {
    pub fn as_str(self) -> &'static str {
        match self {
            DatasetType::Csv => "csv",
            DatasetType::Json => "json",
        }
    }
}

impl FromStr for DatasetType {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(DatasetType::Csv),
            "json" => Ok(DatasetType::Json),
            other => Err(LoaderError::UnsupportedType(other.to_string())),
        }
    }
}

impl fmt::Display for DatasetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named partition of a dataset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    #[default]
    Train,
    Test,
    Validation,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Test, Split::Validation];

    pub fn as_str(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
            Split::Validation => "validation",
        }
    }

    /// Map a split name as it appears in hub file layouts to a [`Split`].
    ///
    /// Case-insensitive; `valid` and `val` are accepted for validation.
    pub fn normalize(name: &str) -> Option<Split> {
        match name.to_ascii_lowercase().as_str() {
            "train" => Some(Split::Train),
            "test" => Some(Split::Test),
            "validation" | "valid" | "val" => Some(Split::Validation),
            _ => None,
        }
    }
}

impl FromStr for Split {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Split::normalize(s).ok_or_else(|| LoaderError::UnsupportedSplit(s.to_string()))
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration handed to the tabular reader.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Field separator for CSV input (a single ASCII character).
    pub separator: Option<char>,
    /// Whether the first CSV row holds column names. Defaults to true.
    pub has_header: Option<bool>,
    /// Number of rows scanned to infer column types.
    pub infer_schema_length: Option<usize>,
    /// Rows to skip at the start of the input.
    pub skip_rows: Option<usize>,
    /// Stop after this many rows.
    pub n_rows: Option<usize>,
    /// Read JSON input as JSON Lines. Inferred from the extension when unset.
    pub lines: Option<bool>,
    /// Additional reader options, forwarded without interpretation.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Options for the hub client.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubOptions {
    /// Branch, tag or commit of the dataset repository.
    pub revision: Option<String>,
    /// Dataset configuration (subset) to restrict file selection to.
    pub config: Option<String>,
    /// Access token. Falls back to `HF_TOKEN`.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Override for the hub download cache directory.
    pub cache_dir: Option<PathBuf>,
}

impl fmt::Debug for HubOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubOptions")
            .field("revision", &self.revision)
            .field("config", &self.config)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("cache_dir", &self.cache_dir)
            .finish()
    }
}

/// A complete load request.
///
/// Field names are snake_case; `datasetType`, `loadAsTable` and
/// `datasetName` are accepted as aliases when deserializing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// `"csv"` or `"json"`; local requests only.
    #[serde(alias = "datasetType")]
    pub dataset_type: Option<String>,
    /// Path of the local file.
    pub path: Option<PathBuf>,
    /// Return a tabular frame instead of a dataset handle.
    #[serde(alias = "loadAsTable")]
    pub load_as_table: bool,
    /// Hub dataset identifier; remote requests only.
    #[serde(alias = "datasetName")]
    pub dataset_name: Option<String>,
    /// Split name; remote requests only.
    pub split: Option<String>,
    // Hub fields must be claimed before the reader's catch-all map.
    #[serde(flatten)]
    pub hub: HubOptions,
    #[serde(flatten)]
    pub reader: ReaderOptions,
}

impl LoadOptions {
    /// Build options from an untyped map.
    pub fn from_map(map: Map<String, Value>) -> Result<Self, LoaderError> {
        Self::from_value(Value::Object(map))
    }

    /// Build options from a JSON value (must be an object).
    pub fn from_value(value: Value) -> Result<Self, LoaderError> {
        serde_json::from_value(value).map_err(LoaderError::InvalidOptions)
    }

    /// Options for a local file.
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Options for a hub dataset.
    pub fn remote(dataset_name: impl Into<String>) -> Self {
        Self {
            dataset_name: Some(dataset_name.into()),
            ..Default::default()
        }
    }

    pub fn with_dataset_type(mut self, dataset_type: impl Into<String>) -> Self {
        self.dataset_type = Some(dataset_type.into());
        self
    }

    pub fn with_load_as_table(mut self, load_as_table: bool) -> Self {
        self.load_as_table = load_as_table;
        self
    }

    pub fn with_split(mut self, split: impl Into<String>) -> Self {
        self.split = Some(split.into());
        self
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.hub.revision = Some(revision.into());
        self
    }

    /// Add a passthrough option for the reader.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.reader.extra.insert(key.into(), value.into());
        self
    }

    /// The requested dataset type, defaulting to CSV.
    pub fn dataset_type(&self) -> Result<DatasetType, LoaderError> {
        self.dataset_type
            .as_deref()
            .unwrap_or(DEFAULT_DATASET_TYPE)
            .parse()
    }

    /// Overlay `other` onto `self`: every field set in `other` wins.
    pub fn merge(mut self, other: LoadOptions) -> Self {
        fn pick<T>(base: &mut Option<T>, over: Option<T>) {
            if over.is_some() {
                *base = over;
            }
        }

        pick(&mut self.dataset_type, other.dataset_type);
        pick(&mut self.path, other.path);
        self.load_as_table |= other.load_as_table;
        pick(&mut self.dataset_name, other.dataset_name);
        pick(&mut self.split, other.split);
        pick(&mut self.hub.revision, other.hub.revision);
        pick(&mut self.hub.config, other.hub.config);
        pick(&mut self.hub.token, other.hub.token);
        pick(&mut self.hub.cache_dir, other.hub.cache_dir);
        pick(&mut self.reader.separator, other.reader.separator);
        pick(&mut self.reader.has_header, other.reader.has_header);
        pick(
            &mut self.reader.infer_schema_length,
            other.reader.infer_schema_length,
        );
        pick(&mut self.reader.skip_rows, other.reader.skip_rows);
        pick(&mut self.reader.n_rows, other.reader.n_rows);
        pick(&mut self.reader.lines, other.reader.lines);
        self.reader.extra.extend(other.reader.extra);
        self
    }

    /// Keep only what the local strategies read.
    pub fn into_local(self) -> LocalFileOptions {
        LocalFileOptions {
            path: self.path,
            load_as_table: self.load_as_table,
            reader: self.reader,
        }
    }

    /// Keep only what the remote strategy reads.
    pub fn into_remote(self) -> RemoteOptions {
        RemoteOptions {
            dataset_name: self.dataset_name,
            split: self.split,
            hub: self.hub,
            reader: self.reader,
        }
    }
}

/// Options for the local CSV and JSON strategies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocalFileOptions {
    pub path: Option<PathBuf>,
    pub load_as_table: bool,
    pub reader: ReaderOptions,
}

/// Options for the remote strategy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RemoteOptions {
    pub dataset_name: Option<String>,
    pub split: Option<String>,
    pub hub: HubOptions,
    /// Applied when the fetched split is materialized.
    pub reader: ReaderOptions,
}

/// Fuzz-only entrypoint for the untyped options boundary.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_load_options(data: &[u8]) -> Result<(), LoaderError> {
    use crate::dataset::DataFileFormat;

    let value: Value = serde_json::from_slice(data).map_err(LoaderError::InvalidOptions)?;
    let options = LoadOptions::from_value(value)?;
    let _ = options.dataset_type();
    if let Some(split) = options.split.as_deref() {
        let _ = split.parse::<Split>();
    }
    for format in [
        DataFileFormat::Parquet,
        DataFileFormat::Csv,
        DataFileFormat::Json,
    ] {
        let _ = crate::table::validate_options(format, &options.reader);
    }
    let _ = options.clone().into_local();
    let _ = options.into_remote();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn dataset_type_parses_exact_tags() {
        assert_eq!("csv".parse::<DatasetType>().unwrap(), DatasetType::Csv);
        assert_eq!("json".parse::<DatasetType>().unwrap(), DatasetType::Json);

        match "parquet".parse::<DatasetType>() {
            Err(LoaderError::UnsupportedType(tag)) => assert_eq!(tag, "parquet"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn split_normalizes_aliases() {
        assert_eq!(Split::normalize("VALID"), Some(Split::Validation));
        assert_eq!(Split::normalize("val"), Some(Split::Validation));
        assert_eq!(Split::normalize("Test"), Some(Split::Test));
        assert_eq!(Split::normalize("unsupervised"), None);
        assert!(matches!(
            "dev".parse::<Split>(),
            Err(LoaderError::UnsupportedSplit(_))
        ));
    }

    #[test]
    fn map_known_keys_are_typed() {
        let options = LoadOptions::from_map(map(json!({
            "path": "data.csv",
            "dataset_type": "csv",
            "load_as_table": true,
            "separator": ";",
            "n_rows": 10,
            "revision": "main",
        })))
        .expect("parse");

        assert_eq!(options.path, Some(PathBuf::from("data.csv")));
        assert_eq!(options.dataset_type.as_deref(), Some("csv"));
        assert!(options.load_as_table);
        assert_eq!(options.reader.separator, Some(';'));
        assert_eq!(options.reader.n_rows, Some(10));
        assert_eq!(options.hub.revision.as_deref(), Some("main"));
        assert!(options.reader.extra.is_empty());
    }

    #[test]
    fn map_unknown_keys_pass_through() {
        let options = LoadOptions::from_map(map(json!({
            "path": "data.csv",
            "quote_char": "'",
            "null_values": ["NA", "-"],
        })))
        .expect("parse");

        assert_eq!(options.reader.extra.len(), 2);
        assert_eq!(options.reader.extra["quote_char"], json!("'"));
        assert_eq!(options.reader.extra["null_values"], json!(["NA", "-"]));
    }

    #[test]
    fn map_accepts_camel_case_aliases() {
        let options = LoadOptions::from_map(map(json!({
            "datasetType": "json",
            "loadAsTable": true,
            "datasetName": "imdb",
        })))
        .expect("parse");

        assert_eq!(options.dataset_type.as_deref(), Some("json"));
        assert!(options.load_as_table);
        assert_eq!(options.dataset_name.as_deref(), Some("imdb"));
    }

    #[test]
    fn map_rejects_ill_typed_known_keys() {
        let err = LoadOptions::from_map(map(json!({ "load_as_table": "yes" })))
            .expect_err("should fail");
        assert!(matches!(err, LoaderError::InvalidOptions(_)));
    }

    #[test]
    fn defaults_apply_when_unset() {
        let options = LoadOptions::default();
        assert_eq!(options.dataset_type().unwrap(), DatasetType::Csv);
        assert!(!options.load_as_table);
        assert_eq!(DEFAULT_SPLIT.parse::<Split>().unwrap(), Split::Train);
    }

    #[test]
    fn merge_prefers_overlay_values() {
        let base = LoadOptions::local("from_file.csv")
            .with_dataset_type("json")
            .with_extra("low_memory", true);
        let overlay = LoadOptions::local("from_flag.csv").with_load_as_table(true);

        let merged = base.merge(overlay);
        assert_eq!(merged.path, Some(PathBuf::from("from_flag.csv")));
        assert_eq!(merged.dataset_type.as_deref(), Some("json"));
        assert!(merged.load_as_table);
        assert_eq!(merged.reader.extra["low_memory"], json!(true));
    }

    #[test]
    fn token_is_redacted_in_debug_output() {
        let hub = HubOptions {
            token: Some("hf_secret".into()),
            ..Default::default()
        };
        let rendered = format!("{hub:?}");
        assert!(!rendered.contains("hf_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
