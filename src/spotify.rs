use crate::{
    config::Credentials,
    service::{MusicService, TrackMatch},
    title::SearchQuery,
    Result,
};
use async_trait::async_trait;
use rspotify::{
    model::{PlayableId, PlaylistId, SearchResult, SearchType, TrackId, UserId},
    prelude::*,
    scopes, AuthCodeSpotify, Config, Credentials as SpotifyCredentials, OAuth,
};
use std::path::PathBuf;

/// The Web API rejects playlist additions larger than this.
const MAX_ITEMS_PER_REQUEST: usize = 100;

pub struct Spotify {
    client: AuthCodeSpotify,
}

/// Builds an authenticated client, prompting the user to authorize in the
/// browser unless a cached token is still usable.
pub async fn new(creds: &Credentials, cache_path: PathBuf) -> Result<Spotify> {
    let spotify_creds = SpotifyCredentials::new(&creds.client_id, &creds.client_secret);

    let oauth = OAuth {
        redirect_uri: creds.redirect_uri.clone(),
        scopes: scopes!("playlist-modify-private"),
        ..Default::default()
    };

    let config = Config {
        cache_path,
        token_cached: true,
        token_refreshing: true,
        ..Default::default()
    };

    let client = AuthCodeSpotify::with_config(spotify_creds, oauth, config);

    let url = client.get_authorize_url(false)?;
    client.prompt_for_token(&url).await?;

    Ok(Spotify { client })
}

#[async_trait]
impl MusicService for Spotify {
    async fn current_user_id(&self) -> Result<String> {
        let user = self.client.current_user().await?;

        Ok(user.id.id().to_string())
    }

    async fn create_playlist(&self, user_id: &str, name: &str) -> Result<String> {
        let user_id = UserId::from_id(user_id)?;
        let playlist = self
            .client
            .user_playlist_create(user_id, name, Some(false), Some(false), None)
            .await?;

        Ok(playlist.id.id().to_string())
    }

    async fn search_track(&self, query: &SearchQuery) -> Result<Option<TrackMatch>> {
        let q = query.to_string();
        debug!("searching spotify for {q:?}");

        let result = self
            .client
            .search(&q, SearchType::Track, None, None, Some(1), None)
            .await?;

        let found = match result {
            SearchResult::Tracks(page) => page.items.into_iter().next(),
            _ => None,
        };

        Ok(found.and_then(|track| {
            track.id.as_ref().map(|id| TrackMatch {
                uri: id.uri(),
                name: track.name.clone(),
                artists: track.artists.iter().map(|a| a.name.clone()).collect(),
            })
        }))
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        let playlist_id = PlaylistId::from_id(playlist_id)?;

        for chunk in uris.chunks(MAX_ITEMS_PER_REQUEST) {
            let items = chunk
                .iter()
                .map(|uri| TrackId::from_id_or_uri(uri).map(PlayableId::Track))
                .collect::<std::result::Result<Vec<_>, _>>()?;

            debug!("adding {} tracks to {}", items.len(), playlist_id.id());
            self.client
                .playlist_add_items(playlist_id.clone(), items, None)
                .await?;
        }

        Ok(())
    }
}
