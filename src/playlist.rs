use crate::{
    service::{MusicService, TrackMatch},
    Error, Result,
};
use clap::ValueEnum;
use indicatif::ProgressBar;

/// When matched tracks are sent to the playlist.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AddMode {
    /// All at once after the scan finishes.
    #[default]
    Bulk,
    /// One at a time, as soon as each track is found.
    Incremental,
}

/// The single remote playlist created for a run.
pub struct PlaylistBuilder {
    id: String,
    name: String,
    mode: AddMode,
    pending: Vec<(String, String)>,
    added: usize,
    progress: ProgressBar,
}

impl PlaylistBuilder {
    /// Creates the playlist under the current user. Failure here ends the run.
    pub async fn create<S: MusicService + ?Sized>(
        service: &S,
        name: &str,
        mode: AddMode,
        progress: &ProgressBar,
    ) -> Result<Self> {
        let user_id = service.current_user_id().await?;

        let id = service
            .create_playlist(&user_id, name)
            .await
            .map_err(|error| Error::CreatePlaylist {
                message: error.to_string(),
            })?;

        info!("created playlist {id} for {user_id}");
        progress.suspend(|| println!("Created playlist: {name}"));

        Ok(PlaylistBuilder {
            id,
            name: name.to_string(),
            mode,
            pending: vec![],
            added: 0,
            progress: progress.clone(),
        })
    }

    /// Number of tracks confirmed on the remote playlist so far.
    pub fn added(&self) -> usize {
        self.added
    }

    /// Queues or sends a matched track. Returns the label back if the track
    /// could not be added.
    pub async fn push<S: MusicService + ?Sized>(
        &mut self,
        service: &S,
        found: TrackMatch,
        label: String,
    ) -> Option<String> {
        match self.mode {
            AddMode::Bulk => {
                self.pending.push((found.uri, label));
                None
            }
            AddMode::Incremental => {
                match service.add_tracks(&self.id, &[found.uri.clone()]).await {
                    Ok(()) => {
                        self.added += 1;
                        None
                    }
                    Err(error) => {
                        error!("failed to add {}: {error}", found.uri);
                        self.progress
                            .suspend(|| println!("Error adding {label} to playlist: {error}"));
                        Some(label)
                    }
                }
            }
        }
    }

    /// Sends anything still queued and reports the result. Returns the labels
    /// of tracks that did not make it onto the playlist.
    pub async fn finish<S: MusicService + ?Sized>(&mut self, service: &S) -> Vec<String> {
        let pending = std::mem::take(&mut self.pending);
        let mut failed = vec![];

        if !pending.is_empty() {
            let uris = pending
                .iter()
                .map(|(uri, _)| uri.clone())
                .collect::<Vec<String>>();

            match service.add_tracks(&self.id, &uris).await {
                Ok(()) => self.added += uris.len(),
                Err(error) => {
                    error!("failed to add {} tracks: {error}", uris.len());
                    self.progress
                        .suspend(|| println!("Error adding songs to playlist: {error}"));
                    failed = pending.into_iter().map(|(_, label)| label).collect();
                }
            }
        }

        if self.added > 0 {
            self.progress.suspend(|| {
                println!(
                    "Added {} songs to playlist '{}'.",
                    self.added, self.name
                )
            });
        } else {
            self.progress
                .suspend(|| println!("No songs were added to the playlist."));
        }

        failed
    }
}
