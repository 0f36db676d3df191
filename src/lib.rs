pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod headers;
pub mod query;
pub mod routes;
pub mod services;
pub mod session;
pub mod storage;
pub mod transport;
pub mod types;

#[cfg(feature = "mock")]
pub use api::MockMusicApi;
pub use api::{MusicApi, MusicApiClient};
pub use auth::{Authenticator, LogoutOutcome};
pub use client::AppClient;
pub use config::ClientConfig;
pub use context::{
    AlbumContext, ArtistContext, PlayerContext, PlayerState, ProfileContext, SearchContext,
    TrackContext,
};
pub use error::{ClientError, FetchError};
pub use events::{ClearReason, ClientEvent, RequestInfo, SharedEventBroadcaster};
pub use query::{Query, QueryState};
pub use routes::{Resolution, Route};
pub use session::SessionStore;
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
pub use transport::{ApiResponse, Transport};
pub use types::{
    Album, AlbumTracks, Artist, ArtistAlbums, ArtistTopTracks, Paged, Profile, SearchFilters,
    SearchRequest, SearchResponse, SearchType, TopArtists, TopTracks, Track,
};

pub type Result<T> = std::result::Result<T, ClientError>;
