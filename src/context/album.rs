use super::Fetcher;
use crate::query::Query;
use crate::types::{Album, AlbumTracks};
use crate::FetchError;

#[derive(Debug)]
pub struct AlbumContext {
    fetcher: Fetcher,
    album: Query<Album>,
    tracks: Query<AlbumTracks>,
}

impl AlbumContext {
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            album: Query::new(),
            tracks: Query::new(),
        }
    }

    pub fn album(&self) -> &Query<Album> {
        &self.album
    }

    pub fn tracks(&self) -> &Query<AlbumTracks> {
        &self.tracks
    }

    /// Fetch an album including its nested track listing.
    pub async fn fetch_album(&self, album_id: &str) -> Result<Album, FetchError> {
        self.fetcher
            .run(&self.album, "album", |api| async move {
                api.get_album(album_id).await
            })
            .await
    }

    /// Fetch only the album's track listing.
    pub async fn fetch_album_tracks(&self, album_id: &str) -> Result<AlbumTracks, FetchError> {
        self.fetcher
            .run(&self.tracks, "album tracks", |api| async move {
                api.get_album_tracks(album_id).await
            })
            .await
    }

    pub fn reset(&self) {
        self.album.reset();
        self.tracks.reset();
    }
}
