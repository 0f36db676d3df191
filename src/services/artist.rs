use super::segment;
use crate::types::{Artist, ArtistAlbums, ArtistTopTracks};
use crate::{Result, Transport};

/// `GET /artists/{id}`
pub async fn get_artist(transport: &Transport, artist_id: &str) -> Result<Artist> {
    transport
        .get(&format!("/artists/{}", segment(artist_id)))
        .await?
        .json()
}

/// `GET /artists/{id}/albums`
pub async fn get_artist_albums(transport: &Transport, artist_id: &str) -> Result<ArtistAlbums> {
    transport
        .get(&format!("/artists/{}/albums", segment(artist_id)))
        .await?
        .json()
}

/// `GET /artists/{id}/top-tracks`
pub async fn get_artist_top_tracks(
    transport: &Transport,
    artist_id: &str,
) -> Result<ArtistTopTracks> {
    transport
        .get(&format!("/artists/{}/top-tracks", segment(artist_id)))
        .await?
        .json()
}
