#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use dataset_loader::hub::{HfRepoRef, HubClient};
use dataset_loader::{Diagnostics, HubOptions, LoaderError};
use walkdir::WalkDir;

pub const HUB_FIXTURES: &str = "tests/fixtures/hub";

/// Hub client serving each repository from `<root>/<repo_id>`.
///
/// Records every call so tests can check what reached the "network".
#[derive(Clone, Default)]
pub struct DirHub {
    root: PathBuf,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl DirHub {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            calls: Arc::default(),
        }
    }

    pub fn fixtures() -> Self {
        Self::new(HUB_FIXTURES)
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    fn repo_dir(&self, repo: &HfRepoRef) -> Result<PathBuf, LoaderError> {
        let dir = self.root.join(&repo.repo_id);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(LoaderError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("repository {} not found", repo.repo_id),
            )))
        }
    }
}

impl HubClient for DirHub {
    fn list_files(&self, repo: &HfRepoRef, _: &HubOptions) -> Result<Vec<String>, LoaderError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(format!("list {}", repo.repo_id));

        let dir = self.repo_dir(repo)?;
        let mut files = collect_files(&dir);
        files.sort();
        Ok(files)
    }

    fn fetch_files(
        &self,
        repo: &HfRepoRef,
        files: &[String],
        _: &HubOptions,
    ) -> Result<Vec<PathBuf>, LoaderError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(format!("fetch {} ({} files)", repo.repo_id, files.len()));

        let dir = self.repo_dir(repo)?;
        Ok(files.iter().map(|file| dir.join(file)).collect())
    }
}

fn collect_files(root: &Path) -> Vec<String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(root).ok()?;
            let parts: Vec<_> = relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy().to_string())
                .collect();
            Some(parts.join("/"))
        })
        .collect()
}

/// Diagnostics sink keeping every reported message.
#[derive(Clone, Default)]
pub struct RecordingDiagnostics {
    pub messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingDiagnostics {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("messages lock").clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, error: &LoaderError) {
        self.messages
            .lock()
            .expect("messages lock")
            .push(error.to_string());
    }
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(&path, contents).expect("write fixture file");
    path
}
