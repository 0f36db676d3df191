use super::Fetcher;
use crate::query::Query;
use crate::types::{Profile, TopArtists, TopTracks};
use crate::FetchError;

/// The authenticated user's profile and listening highlights.
#[derive(Debug)]
pub struct ProfileContext {
    fetcher: Fetcher,
    default_limit: u32,
    profile: Query<Profile>,
    top_artists: Query<TopArtists>,
    top_tracks: Query<TopTracks>,
}

impl ProfileContext {
    pub fn new(fetcher: Fetcher, default_limit: u32) -> Self {
        Self {
            fetcher,
            default_limit,
            profile: Query::new(),
            top_artists: Query::new(),
            top_tracks: Query::new(),
        }
    }

    pub fn profile(&self) -> &Query<Profile> {
        &self.profile
    }

    pub fn top_artists(&self) -> &Query<TopArtists> {
        &self.top_artists
    }

    pub fn top_tracks(&self) -> &Query<TopTracks> {
        &self.top_tracks
    }

    pub async fn fetch_profile(&self) -> Result<Profile, FetchError> {
        self.fetcher
            .run(&self.profile, "profile", |api| async move {
                api.get_profile().await
            })
            .await
    }

    /// Fetch the user's top artists; `None` uses the configured page size.
    pub async fn fetch_top_artists(&self, limit: Option<u32>) -> Result<TopArtists, FetchError> {
        let limit = limit.unwrap_or(self.default_limit);
        self.fetcher
            .run(&self.top_artists, "top artists", |api| async move {
                api.get_top_artists(limit).await
            })
            .await
    }

    /// Fetch the user's top tracks; `None` uses the configured page size.
    pub async fn fetch_top_tracks(&self, limit: Option<u32>) -> Result<TopTracks, FetchError> {
        let limit = limit.unwrap_or(self.default_limit);
        self.fetcher
            .run(&self.top_tracks, "top tracks", |api| async move {
                api.get_top_tracks(limit).await
            })
            .await
    }

    /// Forget everything fetched so far.
    pub fn reset(&self) {
        self.profile.reset();
        self.top_artists.reset();
        self.top_tracks.reset();
    }
}
