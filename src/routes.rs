//! Authentication gate for client-side routes.
//!
//! The view layer asks which route it may show for a path; the answer depends only
//! on whether a session is present.

use std::fmt;

pub const LOGIN: &str = "/login";
pub const AUTH_CALLBACK: &str = "/auth/callback";
pub const DASHBOARD: &str = "/dashboard";
pub const SEARCH: &str = "/search";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    AuthCallback,
    Dashboard,
    Search,
    Album(String),
    Artist(String),
    Track(String),
}

/// Route to render, or a redirect when the requested path is not allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Show(Route),
    Redirect(Route),
}

impl Route {
    /// Parse a path, ignoring any query string or trailing slash.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');

        match path {
            LOGIN => return Some(Route::Login),
            AUTH_CALLBACK => return Some(Route::AuthCallback),
            DASHBOARD => return Some(Route::Dashboard),
            SEARCH => return Some(Route::Search),
            _ => {}
        }

        let mut segments = path.trim_start_matches('/').split('/');
        let (Some(kind), Some(id), None) = (segments.next(), segments.next(), segments.next())
        else {
            return None;
        };
        if id.is_empty() {
            return None;
        }
        match kind {
            "album" => Some(Route::Album(id.to_string())),
            "artist" => Some(Route::Artist(id.to_string())),
            "track" => Some(Route::Track(id.to_string())),
            _ => None,
        }
    }

    /// Whether the route is reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::AuthCallback)
    }

    /// Decide what to show for `path` given the current authentication state.
    ///
    /// Without a session only the login and callback routes are shown; anything
    /// else redirects to login. With a session the public routes and unknown
    /// paths redirect to the dashboard.
    pub fn resolve(path: &str, authenticated: bool) -> Resolution {
        match (Route::parse(path), authenticated) {
            (Some(route), false) if route.is_public() => Resolution::Show(route),
            (_, false) => Resolution::Redirect(Route::Login),
            (Some(route), true) if !route.is_public() => Resolution::Show(route),
            (_, true) => Resolution::Redirect(Route::Dashboard),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => f.write_str(LOGIN),
            Route::AuthCallback => f.write_str(AUTH_CALLBACK),
            Route::Dashboard => f.write_str(DASHBOARD),
            Route::Search => f.write_str(SEARCH),
            Route::Album(id) => write!(f, "/album/{id}"),
            Route::Artist(id) => write!(f, "/artist/{id}"),
            Route::Track(id) => write!(f, "/track/{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Route::parse("/login?logged_out=true"), Some(Route::Login));
        assert_eq!(Route::parse("/search?q=abba"), Some(Route::Search));
        assert_eq!(
            Route::parse("/artist/artist1/"),
            Some(Route::Artist("artist1".to_string()))
        );
        assert_eq!(Route::parse("/artist/"), None);
        assert_eq!(Route::parse("/artist/a/b"), None);
        assert_eq!(Route::parse("/"), None);
    }

    #[test]
    fn test_unauthenticated_gate() {
        assert_eq!(
            Route::resolve("/auth/callback?user_id=x", false),
            Resolution::Show(Route::AuthCallback)
        );
        assert_eq!(
            Route::resolve("/track/t1", false),
            Resolution::Redirect(Route::Login)
        );
        assert_eq!(
            Route::resolve("/nowhere", false),
            Resolution::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_authenticated_gate() {
        assert_eq!(
            Route::resolve("/album/a1", true),
            Resolution::Show(Route::Album("a1".to_string()))
        );
        assert_eq!(
            Route::resolve("/login", true),
            Resolution::Redirect(Route::Dashboard)
        );
        assert_eq!(Route::resolve("/", true), Resolution::Redirect(Route::Dashboard));
    }

    #[test]
    fn test_display_round_trips() {
        let route = Route::Track("t9".to_string());
        assert_eq!(Route::parse(&route.to_string()), Some(route));
    }
}
