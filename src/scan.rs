use crate::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions treated as audio, compared without case.
pub const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "wav", "flac", "m4a", "aac", "ogg"];

pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Recursively walks `root`, yielding every audio file beneath it.
///
/// Siblings are visited in file name order. Entries that cannot be read are
/// logged and skipped rather than ending the walk.
pub fn audio_files(root: &Path) -> Result<impl Iterator<Item = PathBuf>> {
    if !root.is_dir() {
        return Err(Error::FolderNotFound {
            path: root.to_path_buf(),
        });
    }

    let walker = WalkDir::new(root).sort_by_file_name().into_iter();

    Ok(walker
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                warn!("skipping unreadable entry: {error}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_audio_file(entry.path()))
        .map(|entry| entry.into_path()))
}
