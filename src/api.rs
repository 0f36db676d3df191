use crate::services::{album, artist, auth, profile, search, track};
use crate::types::{
    Album, AlbumTracks, Artist, ArtistAlbums, ArtistTopTracks, Profile, SearchRequest,
    SearchResponse, TopArtists, TopTracks, Track,
};
use crate::{Result, SessionStore, Transport};
use async_trait::async_trait;
use std::sync::Arc;

/// Every backend operation the resource contexts depend on.
///
/// Implementations must pass errors through unchanged; the contexts rely on the
/// status code of [`ClientError::Status`](crate::ClientError::Status) to classify
/// failures.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockMusicApi`
/// that implements this trait using the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait MusicApi: Send + Sync {
    /// The authenticated user's profile.
    async fn get_profile(&self) -> Result<Profile>;

    /// The user's most listened artists.
    async fn get_top_artists(&self, limit: u32) -> Result<TopArtists>;

    /// The user's most listened tracks.
    async fn get_top_tracks(&self, limit: u32) -> Result<TopTracks>;

    async fn get_artist(&self, artist_id: &str) -> Result<Artist>;

    async fn get_artist_albums(&self, artist_id: &str) -> Result<ArtistAlbums>;

    async fn get_artist_top_tracks(&self, artist_id: &str) -> Result<ArtistTopTracks>;

    /// A single album with its nested track listing.
    async fn get_album(&self, album_id: &str) -> Result<Album>;

    async fn get_album_tracks(&self, album_id: &str) -> Result<AlbumTracks>;

    async fn get_track(&self, track_id: &str) -> Result<Track>;

    /// Multi-type, paged search.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse>;

    /// Tell the backend to forget the session belonging to `identity`.
    async fn logout(&self, identity: &str) -> Result<()>;
}

/// [`MusicApi`] backed by the resource services over a [`Transport`].
#[derive(Clone, Debug)]
pub struct MusicApiClient {
    transport: Transport,
}

impl MusicApiClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.transport.session()
    }
}

#[async_trait]
impl MusicApi for MusicApiClient {
    async fn get_profile(&self) -> Result<Profile> {
        profile::get_profile(&self.transport).await
    }

    async fn get_top_artists(&self, limit: u32) -> Result<TopArtists> {
        profile::get_top_artists(&self.transport, limit).await
    }

    async fn get_top_tracks(&self, limit: u32) -> Result<TopTracks> {
        profile::get_top_tracks(&self.transport, limit).await
    }

    async fn get_artist(&self, artist_id: &str) -> Result<Artist> {
        artist::get_artist(&self.transport, artist_id).await
    }

    async fn get_artist_albums(&self, artist_id: &str) -> Result<ArtistAlbums> {
        artist::get_artist_albums(&self.transport, artist_id).await
    }

    async fn get_artist_top_tracks(&self, artist_id: &str) -> Result<ArtistTopTracks> {
        artist::get_artist_top_tracks(&self.transport, artist_id).await
    }

    async fn get_album(&self, album_id: &str) -> Result<Album> {
        album::get_album(&self.transport, album_id).await
    }

    async fn get_album_tracks(&self, album_id: &str) -> Result<AlbumTracks> {
        album::get_album_tracks(&self.transport, album_id).await
    }

    async fn get_track(&self, track_id: &str) -> Result<Track> {
        track::get_track(&self.transport, track_id).await
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        search::search(&self.transport, request).await
    }

    async fn logout(&self, identity: &str) -> Result<()> {
        auth::logout(&self.transport, identity).await
    }
}
