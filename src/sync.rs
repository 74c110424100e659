use crate::{
    playlist::{AddMode, PlaylistBuilder},
    report::{MissFilePolicy, MissReport},
    scan,
    service::{MusicService, TrackMatch},
    title::{self, Resolution, Strategy, TrackCandidate, UntaggedPolicy},
    Result,
};
use indicatif::ProgressBar;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct SyncOptions {
    pub folder: PathBuf,
    pub playlist_name: String,
    pub strategy: Strategy,
    pub untagged: UntaggedPolicy,
    pub add_mode: AddMode,
    pub miss_file: MissFilePolicy,
    /// Directory used by [`MissFilePolicy::WorkingDir`].
    pub miss_dir: PathBuf,
}

/// What became of a single discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Matched(TrackMatch),
    Missed(String),
    Skipped(PathBuf),
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub scanned: usize,
    pub matched: usize,
    pub missed: usize,
    pub skipped: usize,
    pub miss_file: Option<PathBuf>,
}

/// Looks a single candidate up. Search failures count as not found.
pub async fn match_candidate<S: MusicService + ?Sized>(
    service: &S,
    candidate: &TrackCandidate,
    progress: &ProgressBar,
) -> Outcome {
    match service.search_track(&candidate.query()).await {
        Ok(Some(found)) => {
            debug!("{} -> {}", candidate.path.display(), found.uri);
            progress.suspend(|| println!("Found: {} by {}", found.name, found.artist_names()));
            Outcome::Matched(found)
        }
        Ok(None) => {
            progress.suspend(|| println!("Song not found: {}", candidate.label()));
            Outcome::Missed(candidate.label())
        }
        Err(error) => {
            error!("search failed for {}: {error}", candidate.path.display());
            progress.suspend(|| println!("Error searching Spotify: {error}"));
            Outcome::Missed(candidate.label())
        }
    }
}

/// Runs one full pass: create the playlist, match every audio file in the
/// folder, fill the playlist and write the miss report.
pub async fn run<S: MusicService + ?Sized>(
    service: &S,
    options: &SyncOptions,
    progress: &ProgressBar,
) -> Result<Summary> {
    let files = scan::audio_files(&options.folder)?.collect::<Vec<PathBuf>>();

    let mut playlist =
        PlaylistBuilder::create(service, &options.playlist_name, options.add_mode, progress)
            .await?;

    info!("scanning {} with {:?}", options.folder.display(), options.strategy);
    progress.suspend(|| println!("Found {} audio files.", files.len()));
    progress.set_length(files.len() as u64);

    let mut summary = Summary {
        scanned: files.len(),
        ..Default::default()
    };
    let mut misses = MissReport::new();

    for path in files {
        let outcome = match title::resolve(&path, options.strategy) {
            Resolution::Candidate(candidate) => {
                progress.set_message(candidate.label());

                match match_candidate(service, &candidate, progress).await {
                    Outcome::Matched(found) => {
                        match playlist.push(service, found.clone(), candidate.label()).await {
                            Some(label) => Outcome::Missed(label),
                            None => Outcome::Matched(found),
                        }
                    }
                    other => other,
                }
            }
            Resolution::Unresolved {
                path,
                fallback_label,
            } => match options.untagged {
                UntaggedPolicy::Skip => Outcome::Skipped(path),
                UntaggedPolicy::Miss => Outcome::Missed(fallback_label),
            },
        };

        match outcome {
            Outcome::Matched(_) => {}
            Outcome::Missed(label) => misses.record(label),
            Outcome::Skipped(path) => {
                warn!("skipping {}", path.display());
                summary.skipped += 1;
            }
        }

        progress.inc(1);
    }

    for label in playlist.finish(service).await {
        misses.record(label);
    }

    summary.matched = playlist.added();
    summary.missed = misses.len();

    let miss_dir = match options.miss_file {
        MissFilePolicy::WorkingDir => &options.miss_dir,
        MissFilePolicy::Folder => &options.folder,
    };
    summary.miss_file = misses.write(miss_dir, options.miss_file)?;

    if let Some(path) = &summary.miss_file {
        progress.suspend(|| println!("Missing songs written to {}", path.display()));
    }

    Ok(summary)
}
