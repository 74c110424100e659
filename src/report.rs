use crate::{IoSnafu, Result};
use clap::ValueEnum;
use snafu::ResultExt;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const MISS_FILE_NAME: &str = "SongsNotFound.txt";

/// Where the list of unmatched songs is written.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MissFilePolicy {
    /// The working directory, numbering the name instead of overwriting.
    #[default]
    WorkingDir,
    /// Inside the scanned folder, replacing any previous report.
    Folder,
}

/// Unmatched tracks in the order they were seen.
#[derive(Default, Debug, Clone)]
pub struct MissReport {
    labels: Vec<String>,
}

impl MissReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record<S: Into<String>>(&mut self, label: S) {
        self.labels.push(label.into());
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Writes the report into `dir`, returning the path written to.
    ///
    /// Nothing is written when every track matched.
    pub fn write(&self, dir: &Path, policy: MissFilePolicy) -> Result<Option<PathBuf>> {
        if self.is_empty() {
            return Ok(None);
        }

        let path = match policy {
            MissFilePolicy::WorkingDir => next_available(dir, MISS_FILE_NAME),
            MissFilePolicy::Folder => dir.join(MISS_FILE_NAME),
        };

        fs::write(&path, self.labels.join("\n")).context(IoSnafu { path: path.clone() })?;
        info!("wrote {} missing songs to {}", self.len(), path.display());

        Ok(Some(path))
    }
}

/// Finds a free name for `file_name` in `dir`: `name.ext`, then `name_1.ext`,
/// `name_2.ext` and so on.
pub fn next_available(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) => (stem, format!(".{ext}")),
        None => (file_name, String::new()),
    };

    (1..)
        .map(|counter| dir.join(format!("{stem}_{counter}{ext}")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}
