use super::Fetcher;
use crate::query::Query;
use crate::types::Track;
use crate::FetchError;

#[derive(Debug)]
pub struct TrackContext {
    fetcher: Fetcher,
    track: Query<Track>,
}

impl TrackContext {
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            track: Query::new(),
        }
    }

    pub fn track(&self) -> &Query<Track> {
        &self.track
    }

    pub async fn fetch_track(&self, track_id: &str) -> Result<Track, FetchError> {
        self.fetcher
            .run(&self.track, "track", |api| async move {
                api.get_track(track_id).await
            })
            .await
    }

    pub fn reset(&self) {
        self.track.reset();
    }
}
