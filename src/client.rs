use crate::api::{MusicApi, MusicApiClient};
use crate::auth::{Authenticator, LogoutOutcome};
use crate::context::{
    AlbumContext, ArtistContext, Fetcher, PlayerContext, ProfileContext, SearchContext,
    TrackContext,
};
use crate::events::ClientEventReceiver;
use crate::routes::{Resolution, Route};
use crate::storage::{FileSessionStorage, SessionStorage};
use crate::{ClientConfig, Result, SessionStore, Transport};
use http_client::HttpClient;
use std::sync::Arc;

/// Everything a view layer needs: the session, the login/logout flow and one
/// data context per resource.
///
/// All contexts share a single [`SessionStore`], so a `401` seen by any of them
/// logs out every other consumer as well.
///
/// # Examples
///
/// ```rust,no_run
/// use spotify_app_client::{AppClient, ClientConfig, Result};
///
/// #[tokio::main]
/// async fn main() -> Result<()> {
///     let http_client = http_client::native::NativeClient::new();
///     let app = AppClient::from_config(Box::new(http_client), ClientConfig::from_env())?;
///
///     if !app.is_authenticated() {
///         println!("Log in at {}", app.login_url());
///         return Ok(());
///     }
///
///     if let Ok(profile) = app.profile().fetch_profile().await {
///         println!("Logged in as {}", profile.display_name.unwrap_or(profile.id));
///     }
///     Ok(())
/// }
/// ```
pub struct AppClient {
    config: ClientConfig,
    session: Arc<SessionStore>,
    auth: Arc<Authenticator>,
    profile: ProfileContext,
    artist: ArtistContext,
    album: AlbumContext,
    track: TrackContext,
    search: SearchContext,
    player: PlayerContext,
}

impl AppClient {
    /// Build a client over `http` with an explicit session storage.
    pub fn new(
        http: Box<dyn HttpClient + Send + Sync>,
        config: ClientConfig,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        let session = Arc::new(SessionStore::new(storage));
        let transport = Transport::new(http, &config, Arc::clone(&session));
        let api: Arc<dyn MusicApi> = Arc::new(MusicApiClient::new(transport));
        Self::with_api(api, session, config)
    }

    /// Build a client that persists the session to `config.session_file`, or the
    /// XDG data directory when none is set.
    pub fn from_config(
        http: Box<dyn HttpClient + Send + Sync>,
        config: ClientConfig,
    ) -> Result<Self> {
        let storage = match &config.session_file {
            Some(path) => FileSessionStorage::new(path),
            None => FileSessionStorage::default_location()?,
        };
        log::debug!("Using session file {}", storage.path().display());
        Ok(Self::new(http, config, Arc::new(storage)))
    }

    /// Build a client over any [`MusicApi`] implementation.
    ///
    /// `session` must be the same store the API stamps its requests from.
    pub fn with_api(
        api: Arc<dyn MusicApi>,
        session: Arc<SessionStore>,
        config: ClientConfig,
    ) -> Self {
        let auth = Arc::new(Authenticator::new(
            Arc::clone(&session),
            Arc::clone(&api),
            config.clone(),
        ));
        let fetcher = Fetcher::new(api, Arc::clone(&auth));
        let limit = config.default_limit;

        Self {
            profile: ProfileContext::new(fetcher.clone(), limit),
            artist: ArtistContext::new(fetcher.clone()),
            album: AlbumContext::new(fetcher.clone()),
            track: TrackContext::new(fetcher.clone()),
            search: SearchContext::new(fetcher, limit),
            player: PlayerContext::new(),
            config,
            session,
            auth,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn authenticator(&self) -> &Arc<Authenticator> {
        &self.auth
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn login_url(&self) -> String {
        self.auth.login_url()
    }

    /// Establish the session from the login callback URL or query string.
    pub fn complete_login(&self, callback: &str) -> Result<()> {
        self.auth.complete_login(callback)
    }

    /// Log out and drop everything the contexts have loaded.
    pub async fn logout(&self) -> LogoutOutcome {
        let outcome = self.auth.logout().await;
        self.reset();
        outcome
    }

    /// Gate `path` on the current authentication state.
    pub fn route(&self, path: &str) -> Resolution {
        Route::resolve(path, self.is_authenticated())
    }

    /// Subscribe to request and session events.
    pub fn subscribe(&self) -> ClientEventReceiver {
        self.session.subscribe()
    }

    pub fn profile(&self) -> &ProfileContext {
        &self.profile
    }

    pub fn artist(&self) -> &ArtistContext {
        &self.artist
    }

    pub fn album(&self) -> &AlbumContext {
        &self.album
    }

    pub fn track(&self) -> &TrackContext {
        &self.track
    }

    pub fn search(&self) -> &SearchContext {
        &self.search
    }

    pub fn player(&self) -> &PlayerContext {
        &self.player
    }

    /// Clear every context's state and hide the player.
    pub fn reset(&self) {
        self.profile.reset();
        self.artist.reset();
        self.album.reset();
        self.track.reset();
        self.search.reset();
        self.player.hide();
    }
}

impl std::fmt::Debug for AppClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppClient")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish()
    }
}
