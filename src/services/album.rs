use super::segment;
use crate::types::{Album, AlbumTracks};
use crate::{Result, Transport};

/// `GET /albums/{id}`, including the nested track listing
pub async fn get_album(transport: &Transport, album_id: &str) -> Result<Album> {
    transport
        .get(&format!("/albums/{}", segment(album_id)))
        .await?
        .json()
}

/// `GET /albums/{id}/tracks`
pub async fn get_album_tracks(transport: &Transport, album_id: &str) -> Result<AlbumTracks> {
    transport
        .get(&format!("/albums/{}/tracks", segment(album_id)))
        .await?
        .json()
}
