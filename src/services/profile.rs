use crate::types::{Profile, TopArtists, TopTracks};
use crate::{Result, Transport};

/// `GET /me/profile`
pub async fn get_profile(transport: &Transport) -> Result<Profile> {
    transport.get("/me/profile").await?.json()
}

/// `GET /me/top/artists?limit=`
pub async fn get_top_artists(transport: &Transport, limit: u32) -> Result<TopArtists> {
    transport
        .get(&format!("/me/top/artists?limit={limit}"))
        .await?
        .json()
}

/// `GET /me/top/tracks?limit=`
pub async fn get_top_tracks(transport: &Transport, limit: u32) -> Result<TopTracks> {
    transport
        .get(&format!("/me/top/tracks?limit={limit}"))
        .await?
        .json()
}
