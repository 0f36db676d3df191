//! Data types for the remote music catalog payloads.
//!
//! Field names match the backend's JSON. Payloads are returned to callers as-is;
//! unknown fields are ignored and optional fields default to empty.

use serde::{Deserialize, Serialize};
use std::fmt;

// ================================================================================================
// SHARED PIECES
// ================================================================================================

/// Cover art or avatar at one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

/// Links to the resource on the provider's own site.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub total: u64,
}

/// One page of a listing endpoint.
///
/// `next` is the backend's link to the following page; `None` means this is the
/// last page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paged<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> Default for Paged<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            href: None,
            limit: None,
            offset: None,
            total: None,
            next: None,
            previous: None,
        }
    }
}

impl<T> Paged<T> {
    pub fn has_next_page(&self) -> bool {
        self.next.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ================================================================================================
// CATALOG RESOURCES
// ================================================================================================

/// An artist as returned by the artist, top-artists and search endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub followers: Option<Followers>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An album, optionally with its nested track listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub album_type: Option<String>,
    #[serde(default)]
    pub total_tracks: Option<u32>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub tracks: Option<Paged<Track>>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub popularity: Option<u32>,
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.artists.first() {
            Some(artist) => write!(f, "{} - {}", artist.name, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// The album summary embedded in a track.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackAlbum {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub album_type: Option<String>,
    #[serde(default)]
    pub total_tracks: Option<u32>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    /// Absent for tracks nested inside an album listing
    #[serde(default)]
    pub album: Option<TrackAlbum>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub disc_number: Option<u32>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub is_playable: Option<bool>,
    #[serde(default)]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub track_number: Option<u32>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub explicit: Option<bool>,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let artists = self
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        if artists.is_empty() {
            write!(f, "{}", self.name)?;
        } else {
            write!(f, "{artists} - {}", self.name)?;
        }
        if let Some(album) = &self.album {
            write!(f, " [{}]", album.name)?;
        }
        Ok(())
    }
}

/// The authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub followers: Option<Followers>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

pub type TopArtists = Paged<Artist>;
pub type TopTracks = Paged<Track>;
pub type ArtistAlbums = Paged<Album>;
pub type AlbumTracks = Paged<Track>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtistTopTracks {
    #[serde(default)]
    pub tracks: Vec<Track>,
}

// ================================================================================================
// SEARCH
// ================================================================================================

/// Result sections the search endpoint can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Track,
    Artist,
    Album,
}

impl SearchType {
    pub const ALL: [SearchType; 3] = [SearchType::Track, SearchType::Artist, SearchType::Album];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Track => "track",
            SearchType::Artist => "artist",
            SearchType::Album => "album",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "track" | "tracks" => Ok(SearchType::Track),
            "artist" | "artists" => Ok(SearchType::Artist),
            "album" | "albums" => Ok(SearchType::Album),
            other => Err(format!("unknown search type '{other}'")),
        }
    }
}

/// Which result sections a search should ask for. All are on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub track: bool,
    pub artist: bool,
    pub album: bool,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            track: true,
            artist: true,
            album: true,
        }
    }
}

impl SearchFilters {
    /// Filters with every section turned off
    pub fn none() -> Self {
        Self {
            track: false,
            artist: false,
            album: false,
        }
    }

    pub fn is_enabled(&self, kind: SearchType) -> bool {
        match kind {
            SearchType::Track => self.track,
            SearchType::Artist => self.artist,
            SearchType::Album => self.album,
        }
    }

    pub fn set(&mut self, kind: SearchType, enabled: bool) {
        match kind {
            SearchType::Track => self.track = enabled,
            SearchType::Artist => self.artist = enabled,
            SearchType::Album => self.album = enabled,
        }
    }

    pub fn toggle(&mut self, kind: SearchType) {
        self.set(kind, !self.is_enabled(kind));
    }

    /// Enabled sections in a stable order: track, artist, album.
    pub fn active_types(&self) -> Vec<SearchType> {
        SearchType::ALL
            .into_iter()
            .filter(|kind| self.is_enabled(*kind))
            .collect()
    }
}

/// Parameters of one search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub types: Vec<SearchType>,
    pub limit: u32,
    pub offset: u32,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, types: Vec<SearchType>, limit: u32) -> Self {
        Self {
            query: query.into(),
            types,
            limit,
            offset: 0,
        }
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// A request that cannot match anything and needs no backend call.
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() || self.types.is_empty()
    }

    /// Comma separated `type` parameter, e.g. `track,artist`.
    pub fn type_param(&self) -> String {
        self.types
            .iter()
            .map(SearchType::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// The same search one page further on.
    pub fn next_page(&self) -> Self {
        self.clone().with_offset(self.offset.saturating_add(self.limit))
    }
}

/// Multi-type search results. Sections that were not requested are absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<Paged<Track>>,
    #[serde(default)]
    pub artists: Option<Paged<Artist>>,
    #[serde(default)]
    pub albums: Option<Paged<Album>>,
    /// The request these results answer.
    #[serde(skip)]
    pub request: Option<SearchRequest>,
}

impl SearchResponse {
    /// Whether no section holds any item.
    pub fn is_empty(&self) -> bool {
        self.tracks.as_ref().map_or(true, Paged::is_empty)
            && self.artists.as_ref().map_or(true, Paged::is_empty)
            && self.albums.as_ref().map_or(true, Paged::is_empty)
    }

    /// Whether any section links to a further page.
    pub fn has_next_page(&self) -> bool {
        self.tracks.as_ref().is_some_and(Paged::has_next_page)
            || self.artists.as_ref().is_some_and(Paged::has_next_page)
            || self.albums.as_ref().is_some_and(Paged::has_next_page)
    }
}
