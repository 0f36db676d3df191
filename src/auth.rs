use crate::api::MusicApi;
use crate::events::ClearReason;
use crate::{ClientConfig, ClientError, Result, SessionStore};
use http_types::Url;
use std::sync::Arc;

/// Query parameter the backend uses to deliver the session identity
pub const CALLBACK_IDENTITY_PARAM: &str = "user_id";

/// Where the consumer should send the user after a logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutOutcome {
    /// Whether a session was actually cleared
    pub was_authenticated: bool,
    /// Client route to navigate to
    pub redirect_to: String,
    /// Provider page that ends the upstream session, to open alongside
    pub provider_logout_url: Option<String>,
}

/// Login hand-off and logout flow on top of the [`SessionStore`].
///
/// The session store itself only knows about local state. This type adds the
/// pieces that talk to the outside: extracting the identity from the login
/// callback, notifying the backend on logout and telling the consumer where to
/// navigate next. Local state always changes first; backend notification is
/// best-effort and its failure never reverses the local transition.
pub struct Authenticator {
    session: Arc<SessionStore>,
    api: Arc<dyn MusicApi>,
    config: ClientConfig,
}

impl Authenticator {
    pub fn new(session: Arc<SessionStore>, api: Arc<dyn MusicApi>, config: ClientConfig) -> Self {
        Self {
            session,
            api,
            config,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Backend entry point that starts the external login redirect.
    pub fn login_url(&self) -> String {
        self.config.login_url()
    }

    /// Establish the session from the login callback.
    ///
    /// Accepts either the full callback URL or just its query string. A missing
    /// or empty `user_id` is rejected and leaves the session untouched.
    pub fn complete_login(&self, callback: &str) -> Result<()> {
        let identity = extract_callback_identity(callback)?;
        self.session.establish(&identity)
    }

    /// Log out: clear the session, then best-effort notify the backend.
    pub async fn logout(&self) -> LogoutOutcome {
        let cleared = self.session.clear(ClearReason::Logout);
        let was_authenticated = cleared.is_some();

        if let Some(identity) = cleared {
            self.notify_backend(&identity).await;
        }

        LogoutOutcome {
            was_authenticated,
            redirect_to: self.config.logged_out_route.clone(),
            provider_logout_url: self.config.provider_logout_url.clone(),
        }
    }

    /// Clear the session after the backend rejected `identity`.
    ///
    /// Returns `false` without touching anything when `identity` is no longer
    /// the live session.
    pub fn expire_session(&self, identity: &str) -> bool {
        self.session
            .clear_if_current(identity, ClearReason::Unauthorized)
    }

    /// Send `DELETE /auth/logout` for `identity`; failures are only logged.
    pub async fn notify_backend(&self, identity: &str) {
        match self.api.logout(identity).await {
            Ok(()) => log::debug!("Backend session removed"),
            Err(e) => log::warn!("Error during logout: {e}"),
        }
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("session", &self.session)
            .field("login_url", &self.login_url())
            .finish()
    }
}

/// Pull the session identity out of a login callback URL or query string.
pub fn extract_callback_identity(callback: &str) -> Result<String> {
    let callback = callback.trim();
    let url = if callback.contains("://") {
        Url::parse(callback)
    } else {
        let query = callback
            .split_once('?')
            .map_or(callback, |(_, query)| query);
        Url::parse(&format!("http://callback/?{query}"))
    }
    .map_err(|e| ClientError::InvalidUrl(format!("{callback}: {e}")))?;

    url.query_pairs()
        .find(|(key, _)| key == CALLBACK_IDENTITY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            log::error!("No user ID found in the callback URL");
            ClientError::InvalidIdentity(format!(
                "callback is missing the '{CALLBACK_IDENTITY_PARAM}' parameter"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_full_url() {
        let id =
            extract_callback_identity("http://localhost:5173/auth/callback?user_id=user-42").unwrap();
        assert_eq!(id, "user-42");
    }

    #[test]
    fn test_extract_from_query_string() {
        assert_eq!(
            extract_callback_identity("?state=x&user_id=abc%20def").unwrap(),
            "abc def"
        );
        assert_eq!(extract_callback_identity("user_id=u1").unwrap(), "u1");
        assert_eq!(
            extract_callback_identity("/auth/callback?user_id=u2").unwrap(),
            "u2"
        );
    }

    #[test]
    fn test_missing_or_empty_identity() {
        assert!(matches!(
            extract_callback_identity("http://localhost/auth/callback"),
            Err(ClientError::InvalidIdentity(_))
        ));
        assert!(matches!(
            extract_callback_identity("user_id="),
            Err(ClientError::InvalidIdentity(_))
        ));
    }
}
