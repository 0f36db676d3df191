use std::env;
use std::path::PathBuf;

/// Backend origin used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Path prefix under which the backend serves its REST surface
pub const DEFAULT_API_PATH: &str = "/api";

/// Backend entry point that starts the external login redirect
pub const DEFAULT_LOGIN_PATH: &str = "/auth/spotify";

/// Client route the user lands on after logging out
pub const DEFAULT_LOGGED_OUT_ROUTE: &str = "/login?logged_out=true";

/// Page that ends the session at the music provider itself
pub const DEFAULT_PROVIDER_LOGOUT_URL: &str = "https://accounts.spotify.com/logout";

/// Default page size for listing endpoints
pub const DEFAULT_LIMIT: u32 = 20;

/// Configuration for the transport, session storage and logout flow.
///
/// Values can be set with the builder-style `with_*` methods or loaded from the
/// environment with [`ClientConfig::from_env`].
///
/// # Examples
///
/// ```rust
/// use spotify_app_client::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_base_url("https://music.example.com")
///     .with_default_limit(50);
///
/// assert_eq!(config.api_base_url(), "https://music.example.com/api");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, e.g. `http://localhost:8080`
    pub base_url: String,
    /// Path prefix of the REST surface, e.g. `/api`
    pub api_path: String,
    /// Backend path that starts the login redirect
    pub login_path: String,
    /// Route the consumer is sent to after logout
    pub logged_out_route: String,
    /// Provider page that ends the upstream session, if any
    pub provider_logout_url: Option<String>,
    /// Page size used when callers do not pass one
    pub default_limit: u32,
    /// Where the session identity is persisted; `None` uses the XDG data directory
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_path: DEFAULT_API_PATH.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            logged_out_route: DEFAULT_LOGGED_OUT_ROUTE.to_string(),
            provider_logout_url: Some(DEFAULT_PROVIDER_LOGOUT_URL.to_string()),
            default_limit: DEFAULT_LIMIT,
            session_file: None,
        }
    }
}

impl ClientConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from `SPOTIFY_APP_*` environment variables.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = env::var("SPOTIFY_APP_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(api_path) = env::var("SPOTIFY_APP_API_PATH") {
            config.api_path = api_path;
        }
        if let Ok(path) = env::var("SPOTIFY_APP_SESSION_FILE") {
            config.session_file = Some(PathBuf::from(path));
        }
        if let Ok(limit) = env::var("SPOTIFY_APP_DEFAULT_LIMIT") {
            match limit.parse::<u32>() {
                Ok(limit) if limit > 0 => config.default_limit = limit,
                _ => log::warn!("Ignoring invalid SPOTIFY_APP_DEFAULT_LIMIT value '{limit}'"),
            }
        }

        config
    }

    /// Set the backend origin
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the REST path prefix
    pub fn with_api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = api_path.into();
        self
    }

    /// Set the default page size
    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }

    /// Persist the session identity to a specific file
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Set or disable the provider logout page
    pub fn with_provider_logout_url(mut self, url: Option<String>) -> Self {
        self.provider_logout_url = url;
        self
    }

    /// Full URL prefix for REST calls, without a trailing slash.
    pub fn api_base_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.api_path.trim_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }

    /// Full URL of the backend login entry point.
    pub fn login_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.login_path.trim_start_matches('/')
        )
    }
}
