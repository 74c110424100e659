use async_trait::async_trait;
use folder_sync::{
    playlist::AddMode,
    report::MissFilePolicy,
    service::{MusicService, TrackMatch},
    sync::SyncOptions,
    title::{SearchQuery, Strategy, UntaggedPolicy},
    Error, Result,
};
use lofty::{
    config::WriteOptions,
    prelude::*,
    tag::{Tag, TagType},
};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tempfile::TempDir;

/// A scripted stand-in for the streaming service.
#[derive(Default)]
pub struct FakeService {
    pub catalogue: HashMap<String, TrackMatch>,
    pub fail_create: bool,
    pub fail_search: bool,
    pub fail_adds: bool,
    pub playlists: Mutex<Vec<String>>,
    pub searches: Mutex<Vec<String>>,
    pub adds: Mutex<Vec<Vec<String>>>,
}

fn client_error(message: &str) -> Error {
    Error::Client {
        message: message.to_string(),
    }
}

impl FakeService {
    pub fn with_tracks(queries: &[&str]) -> Self {
        let catalogue = queries
            .iter()
            .map(|q| (q.to_string(), track_match(q)))
            .collect();

        FakeService {
            catalogue,
            ..Default::default()
        }
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn adds(&self) -> Vec<Vec<String>> {
        self.adds.lock().unwrap().clone()
    }

    pub fn playlists(&self) -> Vec<String> {
        self.playlists.lock().unwrap().clone()
    }
}

pub fn track_match(query: &str) -> TrackMatch {
    TrackMatch {
        uri: uri_for(query),
        name: query.to_string(),
        artists: vec!["Somebody".to_string()],
    }
}

pub fn uri_for(query: &str) -> String {
    format!("spotify:track:{}", query.replace(' ', ""))
}

#[async_trait]
impl MusicService for FakeService {
    async fn current_user_id(&self) -> Result<String> {
        Ok("listener".to_string())
    }

    async fn create_playlist(&self, _user_id: &str, name: &str) -> Result<String> {
        if self.fail_create {
            return Err(client_error("playlist create refused"));
        }
        self.playlists.lock().unwrap().push(name.to_string());

        Ok("playlist-1".to_string())
    }

    async fn search_track(&self, query: &SearchQuery) -> Result<Option<TrackMatch>> {
        let query = query.to_string();
        self.searches.lock().unwrap().push(query.clone());

        if self.fail_search {
            return Err(client_error("search unavailable"));
        }

        Ok(self.catalogue.get(&query).cloned())
    }

    async fn add_tracks(&self, _playlist_id: &str, uris: &[String]) -> Result<()> {
        if self.fail_adds {
            return Err(client_error("add refused"));
        }
        self.adds.lock().unwrap().push(uris.to_vec());

        Ok(())
    }
}

/// A music folder with empty files under the given names, plus a separate
/// working directory for the miss report.
pub fn setup(files: &[&str]) -> (TempDir, TempDir) {
    let music = tempfile::tempdir().expect("failed to create music dir");
    let work = tempfile::tempdir().expect("failed to create work dir");

    for file in files {
        let path = music.path().join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create folder");
        }
        fs::write(path, b"").expect("failed to create file");
    }

    (music, work)
}

pub fn options(music: &Path, work: &Path) -> SyncOptions {
    SyncOptions {
        folder: music.to_path_buf(),
        playlist_name: "From Disk".to_string(),
        strategy: Strategy::Filename,
        untagged: UntaggedPolicy::Skip,
        add_mode: AddMode::Bulk,
        miss_file: MissFilePolicy::WorkingDir,
        miss_dir: work.to_path_buf(),
    }
}

pub fn files_in(dir: &Path) -> Vec<String> {
    let mut names = fs::read_dir(dir)
        .expect("failed to read dir")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect::<Vec<String>>();
    names.sort();
    names
}

/// A short mono 16-bit PCM file of silence.
fn silent_wav() -> Vec<u8> {
    let samples = [0u8; 64];
    let mut wav = Vec::new();

    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + samples.len() as u32).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&8000u32.to_le_bytes());
    wav.extend_from_slice(&16000u32.to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&(samples.len() as u32).to_le_bytes());
    wav.extend_from_slice(&samples);

    wav
}

/// Writes a WAV file carrying an ID3v2 tag with the given fields.
pub fn write_tagged_wav(
    dir: &Path,
    name: &str,
    title: Option<&str>,
    artist: Option<&str>,
) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, silent_wav()).expect("failed to write wav");

    let mut tag = Tag::new(TagType::Id3v2);
    if let Some(title) = title {
        tag.set_title(title.to_string());
    }
    if let Some(artist) = artist {
        tag.set_artist(artist.to_string());
    }
    tag.save_to_path(&path, WriteOptions::default())
        .expect("failed to write tags");

    path
}
