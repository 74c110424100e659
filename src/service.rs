use crate::{title::SearchQuery, Result};
use async_trait::async_trait;

/// The first search result returned for a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMatch {
    pub uri: String,
    pub name: String,
    pub artists: Vec<String>,
}

impl TrackMatch {
    pub fn artist_names(&self) -> String {
        self.artists.join(", ")
    }
}

/// The slice of a streaming service's API this tool consumes.
///
/// Ids and URIs are opaque strings handed back to the same service.
#[async_trait]
pub trait MusicService: Send + Sync {
    async fn current_user_id(&self) -> Result<String>;

    /// Creates a private playlist owned by `user_id`, returning its id.
    async fn create_playlist(&self, user_id: &str, name: &str) -> Result<String>;

    /// Returns at most one track for the query.
    async fn search_track(&self, query: &SearchQuery) -> Result<Option<TrackMatch>>;

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()>;
}
