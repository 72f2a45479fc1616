//! Hugging Face Hub access.
//!
//! This module owns remote-specific concerns: dataset reference resolution,
//! choosing the data files of a split, and the client that lists and
//! downloads repository files. Parsing the downloaded files stays in
//! `crate::table`.

mod client;
pub mod resolve;
pub mod select;

pub use client::{HfHubClient, HubClient};

/// Canonical reference to a Hugging Face dataset repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HfRepoRef {
    pub repo_id: String,
    pub revision: Option<String>,
    pub config: Option<String>,
}
