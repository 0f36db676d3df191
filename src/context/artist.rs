use super::Fetcher;
use crate::query::Query;
use crate::types::{Artist, ArtistAlbums, ArtistTopTracks};
use crate::FetchError;

/// The artist being viewed, with its albums and top tracks side by side.
#[derive(Debug)]
pub struct ArtistContext {
    fetcher: Fetcher,
    artist: Query<Artist>,
    albums: Query<ArtistAlbums>,
    top_tracks: Query<ArtistTopTracks>,
}

impl ArtistContext {
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            artist: Query::new(),
            albums: Query::new(),
            top_tracks: Query::new(),
        }
    }

    pub fn artist(&self) -> &Query<Artist> {
        &self.artist
    }

    pub fn albums(&self) -> &Query<ArtistAlbums> {
        &self.albums
    }

    pub fn top_tracks(&self) -> &Query<ArtistTopTracks> {
        &self.top_tracks
    }

    pub async fn fetch_artist(&self, artist_id: &str) -> Result<Artist, FetchError> {
        self.fetcher
            .run(&self.artist, "artist", |api| async move {
                api.get_artist(artist_id).await
            })
            .await
    }

    pub async fn fetch_artist_albums(&self, artist_id: &str) -> Result<ArtistAlbums, FetchError> {
        self.fetcher
            .run(&self.albums, "artist albums", |api| async move {
                api.get_artist_albums(artist_id).await
            })
            .await
    }

    pub async fn fetch_artist_top_tracks(
        &self,
        artist_id: &str,
    ) -> Result<ArtistTopTracks, FetchError> {
        self.fetcher
            .run(&self.top_tracks, "artist top tracks", |api| async move {
                api.get_artist_top_tracks(artist_id).await
            })
            .await
    }

    /// Fetch the artist, its albums and its top tracks concurrently.
    ///
    /// Each state resolves on its own; the first failure is returned.
    pub async fn fetch_all(&self, artist_id: &str) -> Result<(), FetchError> {
        let (artist, albums, top_tracks) = futures::join!(
            self.fetch_artist(artist_id),
            self.fetch_artist_albums(artist_id),
            self.fetch_artist_top_tracks(artist_id),
        );
        artist?;
        albums?;
        top_tracks?;
        Ok(())
    }

    pub fn reset(&self) {
        self.artist.reset();
        self.albums.reset();
        self.top_tracks.reset();
    }
}
