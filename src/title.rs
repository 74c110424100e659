use clap::ValueEnum;
use lofty::prelude::*;
use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*?\)|\[.*?\]").unwrap());
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Where the search title for a file comes from.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Clean up the file name.
    #[default]
    Filename,
    /// Read the title and artist tags.
    Tags,
}

/// What to do with a file whose tags lack a title or artist.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum UntaggedPolicy {
    /// Leave it out of the run entirely.
    #[default]
    Skip,
    /// Record it as not found, labelled by its file name.
    Miss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    FreeText(String),
    Structured { title: String, artist: String },
}

impl Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchQuery::FreeText(title) => f.write_str(title),
            SearchQuery::Structured { title, artist } => {
                write!(f, "track:{title} artist:{artist}")
            }
        }
    }
}

/// A local file on its way to being matched against the remote catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackCandidate {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
}

impl TrackCandidate {
    /// The name written to the miss report.
    pub fn label(&self) -> String {
        match &self.artist {
            Some(artist) => format!("{} - {}", self.title, artist),
            None => self.title.clone(),
        }
    }

    pub fn query(&self) -> SearchQuery {
        match &self.artist {
            Some(artist) => SearchQuery::Structured {
                title: self.title.clone(),
                artist: artist.clone(),
            },
            None => SearchQuery::FreeText(self.title.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Candidate(TrackCandidate),
    Unresolved {
        path: PathBuf,
        fallback_label: String,
    },
}

/// Strips bracketed text, turns hyphens and underscores into spaces and
/// squeezes the whitespace.
pub fn clean_title(raw: &str) -> String {
    let title = BRACKETED.replace_all(raw, "");
    let title = SEPARATORS.replace_all(&title, " ");
    let title = WHITESPACE.replace_all(&title, " ");

    title.trim().to_string()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

pub fn from_filename(path: &Path) -> TrackCandidate {
    TrackCandidate {
        path: path.to_path_buf(),
        title: clean_title(&file_stem(path)),
        artist: None,
    }
}

fn non_empty(value: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn from_tags(path: &Path) -> Option<TrackCandidate> {
    let tagged = match lofty::read_from_path(path) {
        Ok(tagged) => tagged,
        Err(error) => {
            warn!("unable to read tags from {}: {error}", path.display());
            return None;
        }
    };

    let tag = tagged.primary_tag().or_else(|| tagged.first_tag())?;

    match (non_empty(tag.title()), non_empty(tag.artist())) {
        (Some(title), Some(artist)) => Some(TrackCandidate {
            path: path.to_path_buf(),
            title,
            artist: Some(artist),
        }),
        _ => {
            info!("missing title or artist tag in {}", path.display());
            None
        }
    }
}

pub fn resolve(path: &Path, strategy: Strategy) -> Resolution {
    let candidate = match strategy {
        Strategy::Filename => Some(from_filename(path)),
        Strategy::Tags => from_tags(path),
    };

    match candidate {
        Some(candidate) => Resolution::Candidate(candidate),
        None => Resolution::Unresolved {
            path: path.to_path_buf(),
            fallback_label: clean_title(&file_stem(path)),
        },
    }
}
