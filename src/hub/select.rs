//! Choosing the data files that make up a split.
//!
//! Hub dataset repositories lay splits out in a handful of conventional ways:
//!
//! - sharded Parquet: `plain_text/train-00000-of-00002.parquet`
//! - one file per split: `data/test.csv`, `validation.jsonl`
//! - one directory per split: `train/part-0.json`
//!
//! The split of a file is inferred from its name first and then from its
//! directories, innermost first.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path};

use crate::dataset::DataFileFormat;
use crate::options::Split;

/// Data files selected for one split.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitFiles {
    pub format: DataFileFormat,
    /// Repository-relative paths, sorted.
    pub files: Vec<String>,
}

/// Pick the files of `split` from a repository listing.
///
/// With `config`, only files below a directory of that name are considered.
/// Without it, and when the split is spread over several directories (one per
/// configuration), the first directory in path order wins. When the split
/// exists in more than one format, Parquet is preferred, then CSV, then JSON.
///
/// Returns `None` if no data file belongs to the split.
pub fn select_split_files(
    paths: &[String],
    split: Split,
    config: Option<&str>,
) -> Option<SplitFiles> {
    let mut by_format: BTreeMap<DataFileFormat, BTreeSet<&str>> = BTreeMap::new();

    for path in paths {
        if is_hidden(path) {
            continue;
        }
        let Some(format) = DataFileFormat::from_path(path) else {
            continue;
        };
        if infer_split_from_path(path) != Some(split) {
            continue;
        }
        if let Some(config) = config {
            if !in_directory(path, config) {
                continue;
            }
        }
        by_format.entry(format).or_default().insert(path.as_str());
    }

    // BTreeMap order is the preference order.
    let (format, candidates) = by_format.into_iter().next()?;

    let selected_parent = candidates.iter().next().map(|path| parent_dir(path))?;
    let files = candidates
        .into_iter()
        .filter(|path| config.is_some() || parent_dir(path) == selected_parent)
        .map(str::to_string)
        .collect();

    Some(SplitFiles { format, files })
}

/// Infer the split a repository file belongs to.
pub fn infer_split_from_path(path: &str) -> Option<Split> {
    let parsed = Path::new(path);
    let file_name = parsed
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_ascii_lowercase());

    if let Some(file_name) = file_name {
        if let Some((prefix, _)) = file_name.split_once('-') {
            if let Some(split) = Split::normalize(prefix) {
                return Some(split);
            }
        }
        if let Some((stem, _)) = file_name.split_once('.') {
            if let Some(split) = Split::normalize(stem) {
                return Some(split);
            }
        }
    }

    parsed
        .parent()?
        .components()
        .rev()
        .filter_map(|component| match component {
            Component::Normal(name) => name.to_str(),
            _ => None,
        })
        .find_map(Split::normalize)
}

fn parent_dir(path: &str) -> String {
    Path::new(path)
        .parent()
        .map(|parent| parent.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn in_directory(path: &str, dir: &str) -> bool {
    Path::new(path)
        .parent()
        .map(|parent| {
            parent
                .components()
                .any(|component| component.as_os_str() == dir)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &str) -> bool {
    path.split('/').any(|segment| segment.starts_with('.'))
}
