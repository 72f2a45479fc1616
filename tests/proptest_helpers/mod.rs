#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Column names `c0..cN`, unique by construction.
pub fn column_names(width: usize) -> Vec<String> {
    (0..width).map(|i| format!("c{i}")).collect()
}

/// A small integer table: (column count, rows).
pub fn arb_int_table(max_cols: usize, max_rows: usize) -> BoxedStrategy<(usize, Vec<Vec<i64>>)> {
    (1..=max_cols)
        .prop_flat_map(move |width| {
            (
                Just(width),
                prop::collection::vec(
                    prop::collection::vec(-1_000_000i64..1_000_000, width),
                    1..=max_rows,
                ),
            )
        })
        .boxed()
}

pub fn to_csv(width: usize, rows: &[Vec<i64>]) -> String {
    let mut out = column_names(width).join(",");
    out.push('\n');
    for row in rows {
        let cells: Vec<String> = row.iter().map(i64::to_string).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

/// Dataset type tags other than the two supported ones.
pub fn arb_unsupported_type() -> BoxedStrategy<String> {
    "[a-zA-Z0-9_.-]{0,12}"
        .prop_filter("supported tag", |tag| tag != "csv" && tag != "json")
        .boxed()
}

/// Split names no layout convention maps to a known split.
pub fn arb_unknown_split() -> BoxedStrategy<String> {
    "[a-z]{1,12}"
        .prop_filter("known split", |name| {
            !matches!(name.as_str(), "train" | "test" | "validation" | "valid" | "val")
        })
        .boxed()
}
