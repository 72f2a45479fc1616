//! Tabular readers backed by polars.
//!
//! Each reader takes a path and a [`ReaderOptions`] and returns a
//! [`DataFrame`]. Parser errors come back as [`LoaderError::Table`] with the
//! polars error unchanged.
//!
//! # Passthrough options
//!
//! Keys in [`ReaderOptions::extra`] are interpreted here and nowhere else.
//! The CSV reader understands:
//! - `quote_char`: a single ASCII character
//! - `null_values`: a string, or a list of strings, read as null
//! - `ignore_errors`: bool
//! - `low_memory`: bool
//!
//! The JSON and Parquet readers take no extra keys. An unknown key fails with
//! [`LoaderError::UnsupportedOption`] before the file is opened.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use polars::prelude::{
    CsvReader, DataFrame, JsonFormat, JsonReader, NullValues, ParquetReader, PolarsError,
    SerReader,
};
use serde_json::Value;

use crate::dataset::DataFileFormat;
use crate::error::LoaderError;
use crate::options::ReaderOptions;

/// Rows scanned for type inference when the request does not say.
pub const DEFAULT_INFER_SCHEMA_LENGTH: usize = 100;

/// Reader settings taken from the passthrough map.
#[derive(Debug, Default)]
struct CsvExtras {
    quote_char: Option<u8>,
    null_values: Option<NullValues>,
    ignore_errors: Option<bool>,
    low_memory: Option<bool>,
}

impl CsvExtras {
    fn from_options(opts: &ReaderOptions) -> Result<Self, LoaderError> {
        let mut extras = CsvExtras::default();
        for (key, value) in &opts.extra {
            match key.as_str() {
                "quote_char" => {
                    let quote = char_value(key, value)?;
                    extras.quote_char = Some(ascii_byte(key, quote)?);
                }
                "null_values" => extras.null_values = Some(null_values(key, value)?),
                "ignore_errors" => extras.ignore_errors = Some(bool_value(key, value)?),
                "low_memory" => extras.low_memory = Some(bool_value(key, value)?),
                _ => {
                    return Err(LoaderError::UnsupportedOption {
                        key: key.clone(),
                        reader: "csv",
                    })
                }
            }
        }
        Ok(extras)
    }
}

/// Reads a CSV file into a frame.
///
/// # Errors
/// Returns [`LoaderError::InvalidOption`] or [`LoaderError::UnsupportedOption`]
/// for unusable options, and [`LoaderError::Table`] when polars cannot parse
/// the file.
pub fn read_csv(path: &Path, opts: &ReaderOptions) -> Result<DataFrame, LoaderError> {
    let separator = csv_separator(opts)?;
    let extras = CsvExtras::from_options(opts)?;

    debug!("reading CSV {}", path.display());
    let mut reader = CsvReader::from_path(path)?
        .has_header(opts.has_header.unwrap_or(true))
        .with_separator(separator)
        .infer_schema(Some(
            opts.infer_schema_length
                .unwrap_or(DEFAULT_INFER_SCHEMA_LENGTH),
        ))
        .with_skip_rows(opts.skip_rows.unwrap_or(0))
        .with_n_rows(opts.n_rows);

    if let Some(quote_char) = extras.quote_char {
        reader = reader.with_quote_char(Some(quote_char));
    }
    if let Some(null_values) = extras.null_values {
        reader = reader.with_null_values(Some(null_values));
    }
    if let Some(ignore_errors) = extras.ignore_errors {
        reader = reader.with_ignore_errors(ignore_errors);
    }
    if let Some(low_memory) = extras.low_memory {
        reader = reader.low_memory(low_memory);
    }

    Ok(reader.finish()?)
}

/// Reads a JSON array of records, or JSON Lines, into a frame.
///
/// JSON Lines is used when `lines` is set, or when it is unset and the file
/// ends in `.jsonl` or `.ndjson`.
pub fn read_json(path: &Path, opts: &ReaderOptions) -> Result<DataFrame, LoaderError> {
    reject_extras(opts, "json")?;

    let lines = opts.lines.unwrap_or_else(|| is_json_lines(path));
    let format = if lines {
        JsonFormat::JsonLines
    } else {
        JsonFormat::Json
    };

    debug!("reading JSON {} (lines: {lines})", path.display());
    let file = open_data_file(path)?;
    let df = JsonReader::new(file)
        .with_json_format(format)
        .infer_schema_len(Some(
            opts.infer_schema_length
                .unwrap_or(DEFAULT_INFER_SCHEMA_LENGTH),
        ))
        .finish()?;

    Ok(slice_rows(df, opts))
}

/// Reads a Parquet file into a frame.
pub fn read_parquet(path: &Path, opts: &ReaderOptions) -> Result<DataFrame, LoaderError> {
    reject_extras(opts, "parquet")?;

    debug!("reading Parquet {}", path.display());
    let mut file = open_data_file(path)?;
    let df = ParquetReader::new(&mut file).finish()?;

    Ok(slice_rows(df, opts))
}

/// Checks that `opts` can be handed to the reader for `format`.
///
/// Runs the same key checks the reader would, without touching any file.
pub fn validate_options(format: DataFileFormat, opts: &ReaderOptions) -> Result<(), LoaderError> {
    match format {
        DataFileFormat::Csv => {
            csv_separator(opts)?;
            CsvExtras::from_options(opts).map(|_| ())
        }
        DataFileFormat::Json => reject_extras(opts, "json"),
        DataFileFormat::Parquet => reject_extras(opts, "parquet"),
    }
}

/// Reads one file with the reader matching `format`.
pub fn read_table(
    format: DataFileFormat,
    path: &Path,
    opts: &ReaderOptions,
) -> Result<DataFrame, LoaderError> {
    match format {
        DataFileFormat::Csv => read_csv(path, opts),
        DataFileFormat::Json => read_json(path, opts),
        DataFileFormat::Parquet => read_parquet(path, opts),
    }
}

/// Reads every file and stacks the frames in file order.
///
/// An empty file list yields an empty frame.
pub fn read_tables(
    format: DataFileFormat,
    files: &[PathBuf],
    opts: &ReaderOptions,
) -> Result<DataFrame, LoaderError> {
    let mut files = files.iter();
    let Some(first) = files.next() else {
        return Ok(DataFrame::empty());
    };

    let mut frame = read_table(format, first, opts)?;
    for path in files {
        let next = read_table(format, path, opts)?;
        frame.vstack_mut(&next)?;
    }
    Ok(frame)
}

fn csv_separator(opts: &ReaderOptions) -> Result<u8, LoaderError> {
    match opts.separator {
        Some(separator) => ascii_byte("separator", separator),
        None => Ok(b','),
    }
}

/// Opens `path` the way the polars CSV reader does, naming the path on failure.
fn open_data_file(path: &Path) -> Result<File, PolarsError> {
    File::open(path).map_err(|err| {
        PolarsError::Io(io::Error::new(
            err.kind(),
            format!("{err}: {}", path.display()),
        ))
    })
}

fn is_json_lines(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "jsonl" | "ndjson"))
        .unwrap_or(false)
}

/// `skip_rows` / `n_rows` for readers without native support.
fn slice_rows(df: DataFrame, opts: &ReaderOptions) -> DataFrame {
    if opts.skip_rows.is_none() && opts.n_rows.is_none() {
        return df;
    }
    let offset = opts.skip_rows.unwrap_or(0).min(df.height());
    let length = opts
        .n_rows
        .unwrap_or(usize::MAX)
        .min(df.height() - offset);
    df.slice(offset as i64, length)
}

fn reject_extras(opts: &ReaderOptions, reader: &'static str) -> Result<(), LoaderError> {
    match opts.extra.keys().next() {
        Some(key) => Err(LoaderError::UnsupportedOption {
            key: key.clone(),
            reader,
        }),
        None => Ok(()),
    }
}

fn ascii_byte(key: &str, value: char) -> Result<u8, LoaderError> {
    if value.is_ascii() {
        Ok(value as u8)
    } else {
        Err(LoaderError::InvalidOption {
            key: key.to_string(),
            message: format!("'{value}' is not a single-byte ASCII character"),
        })
    }
}

fn char_value(key: &str, value: &Value) -> Result<char, LoaderError> {
    let invalid = || LoaderError::InvalidOption {
        key: key.to_string(),
        message: format!("expected a one-character string, found {value}"),
    };

    let text = value.as_str().ok_or_else(invalid)?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(invalid()),
    }
}

fn bool_value(key: &str, value: &Value) -> Result<bool, LoaderError> {
    value.as_bool().ok_or_else(|| LoaderError::InvalidOption {
        key: key.to_string(),
        message: format!("expected a boolean, found {value}"),
    })
}

fn null_values(key: &str, value: &Value) -> Result<NullValues, LoaderError> {
    let invalid = || LoaderError::InvalidOption {
        key: key.to_string(),
        message: format!("expected a string or a list of strings, found {value}"),
    };

    match value {
        Value::String(single) => Ok(NullValues::AllColumnsSingle(single.clone())),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()
            .map(NullValues::AllColumns),
        _ => Err(invalid()),
    }
}
