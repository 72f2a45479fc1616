use std::path::PathBuf;

use hf_hub::api::sync::{ApiBuilder, ApiRepo};
use hf_hub::{Repo, RepoType};
use log::{debug, info};

use crate::error::LoaderError;
use crate::options::HubOptions;

use super::HfRepoRef;

/// The two hub operations the remote strategy needs.
///
/// [`HfHubClient`] talks to huggingface.co; tests substitute a client that
/// serves files from disk.
pub trait HubClient: Send + Sync {
    /// Paths of every file in the dataset repository, relative to its root.
    fn list_files(&self, repo: &HfRepoRef, opts: &HubOptions)
        -> Result<Vec<String>, LoaderError>;

    /// Download `files` and return their local paths, in the same order.
    fn fetch_files(
        &self,
        repo: &HfRepoRef,
        files: &[String],
        opts: &HubOptions,
    ) -> Result<Vec<PathBuf>, LoaderError>;
}

/// [`HubClient`] backed by the `hf-hub` blocking API.
///
/// Downloads go through the hub's local cache, so fetching a file that is
/// already cached does not touch the network.
#[derive(Clone, Copy, Debug, Default)]
pub struct HfHubClient;

impl HfHubClient {
    fn repo(&self, repo_ref: &HfRepoRef, opts: &HubOptions) -> Result<ApiRepo, LoaderError> {
        let mut builder = ApiBuilder::new().with_progress(false);

        let token_from_env = std::env::var("HF_TOKEN").ok();
        let effective_token = opts.token.clone().or(token_from_env);
        if effective_token.is_some() {
            builder = builder.with_token(effective_token);
        }
        if let Some(cache_dir) = opts.cache_dir.as_ref() {
            builder = builder.with_cache_dir(cache_dir.clone());
        }

        let api = builder.build()?;

        let repo = if let Some(revision) = repo_ref.revision.as_ref() {
            api.repo(Repo::with_revision(
                repo_ref.repo_id.clone(),
                RepoType::Dataset,
                revision.clone(),
            ))
        } else {
            api.dataset(repo_ref.repo_id.clone())
        };
        Ok(repo)
    }
}

impl HubClient for HfHubClient {
    fn list_files(
        &self,
        repo_ref: &HfRepoRef,
        opts: &HubOptions,
    ) -> Result<Vec<String>, LoaderError> {
        let repo_info = self.repo(repo_ref, opts)?.info()?;
        debug!(
            "{} lists {} file(s) at {}",
            repo_ref.repo_id,
            repo_info.siblings.len(),
            repo_info.sha
        );

        Ok(repo_info
            .siblings
            .into_iter()
            .map(|sibling| sibling.rfilename)
            .collect())
    }

    fn fetch_files(
        &self,
        repo_ref: &HfRepoRef,
        files: &[String],
        opts: &HubOptions,
    ) -> Result<Vec<PathBuf>, LoaderError> {
        let repo = self.repo(repo_ref, opts)?;

        let mut local = Vec::with_capacity(files.len());
        for remote_path in files {
            info!("fetching {}/{}", repo_ref.repo_id, remote_path);
            local.push(repo.get(remote_path)?);
        }
        Ok(local)
    }
}
