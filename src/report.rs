//! Load report types and terminal formatting.
//!
//! A [`LoadReport`] summarizes what a load produced, for the CLI's text and
//! JSON output.

use std::fmt;

use polars::prelude::DataFrame;
use serde::Serialize;

use crate::dataset::HubDataset;
use crate::loader::Loaded;

/// Summary of a loaded result.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadReport {
    Table(TableSummary),
    Dataset(DatasetSummary),
}

/// Summary of a tabular frame.
#[derive(Clone, Debug, Serialize)]
pub struct TableSummary {
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
    /// Rendered first rows, text output only.
    #[serde(skip)]
    pub preview: Option<String>,
}

/// A column name with its inferred type.
#[derive(Clone, Debug, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: String,
}

/// Summary of a hub-native dataset.
#[derive(Clone, Debug, Serialize)]
pub struct DatasetSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    pub format: String,
    pub splits: Vec<SplitSummary>,
}

/// One split with its data files.
#[derive(Clone, Debug, Serialize)]
pub struct SplitSummary {
    pub split: String,
    pub files: Vec<String>,
}

impl LoadReport {
    /// Summarize a load result. `head` rows of a frame are rendered for text
    /// output.
    pub fn from_loaded(loaded: &Loaded, head: Option<usize>) -> Self {
        match loaded {
            Loaded::Table(df) => LoadReport::Table(TableSummary::from_frame(df, head)),
            Loaded::Dataset(dataset) => LoadReport::Dataset(DatasetSummary::from_dataset(dataset)),
        }
    }
}

impl TableSummary {
    pub fn from_frame(df: &DataFrame, head: Option<usize>) -> Self {
        let columns = df
            .get_columns()
            .iter()
            .map(|series| ColumnSummary {
                name: series.name().to_string(),
                dtype: series.dtype().to_string(),
            })
            .collect();

        Self {
            rows: df.height(),
            columns,
            preview: head.map(|n| df.head(Some(n)).to_string()),
        }
    }
}

impl DatasetSummary {
    pub fn from_dataset(dataset: &HubDataset) -> Self {
        Self {
            name: dataset.name().to_string(),
            revision: dataset.revision().map(str::to_string),
            format: dataset.format().to_string(),
            splits: dataset
                .splits()
                .map(|split| SplitSummary {
                    split: split.split().to_string(),
                    files: split
                        .files()
                        .iter()
                        .map(|path| path.display().to_string())
                        .collect(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadReport::Table(table) => table.fmt(f),
            LoadReport::Dataset(dataset) => dataset.fmt(f),
        }
    }
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Table: {} row(s) x {} column(s)",
            self.rows,
            self.columns.len()
        )?;
        let name_width = self
            .columns
            .iter()
            .map(|column| column.name.len())
            .max()
            .unwrap_or(0);
        for column in &self.columns {
            writeln!(
                f,
                "  {:<width$}  {}",
                column.name,
                column.dtype,
                width = name_width
            )?;
        }
        if let Some(preview) = &self.preview {
            writeln!(f)?;
            writeln!(f, "{preview}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dataset: {}", self.name)?;
        if let Some(revision) = &self.revision {
            write!(f, " @ {revision}")?;
        }
        writeln!(f, " ({})", self.format)?;
        for split in &self.splits {
            writeln!(f, "  {}: {} file(s)", split.split, split.files.len())?;
            for file in &split.files {
                writeln!(f, "    {file}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("a", &[1i64, 3]),
            Series::new("b", &[2i64, 4]),
        ])
        .expect("frame")
    }

    #[test]
    fn table_summary_lists_columns() {
        let report = LoadReport::from_loaded(&Loaded::Table(sample_frame()), None);
        let text = report.to_string();

        assert!(text.starts_with("Table: 2 row(s) x 2 column(s)"));
        assert!(text.contains("a  i64"));
        assert!(text.contains("b  i64"));
    }

    #[test]
    fn table_summary_json_omits_preview() {
        let report = LoadReport::from_loaded(&Loaded::Table(sample_frame()), Some(1));
        let json = serde_json::to_value(&report).expect("serialize");

        assert_eq!(json["kind"], "table");
        assert_eq!(json["rows"], 2);
        assert_eq!(json["columns"][0]["name"], "a");
        assert!(json.get("preview").is_none());
    }
}
