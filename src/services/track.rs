use super::segment;
use crate::types::Track;
use crate::{Result, Transport};

/// `GET /tracks/{id}`
pub async fn get_track(transport: &Transport, track_id: &str) -> Result<Track> {
    transport
        .get(&format!("/tracks/{}", segment(track_id)))
        .await?
        .json()
}
