//! Resource data contexts.
//!
//! Each context owns one or more named [`Query`] states and exposes one fetch
//! operation per state. Every fetch follows the same contract, implemented once
//! in [`Fetcher::run`]:
//!
//! 1. Without a session the state fails with [`FetchError::Unauthenticated`] and no
//!    request is made.
//! 2. Otherwise the state goes pending and the previous failure is cleared.
//! 3. The backend is called through [`MusicApi`].
//! 4. Success stores the payload.
//! 5. A `401` clears the session and fails with [`FetchError::SessionExpired`].
//! 6. Anything else fails with [`FetchError::RequestFailed`].
//!
//! Contexts are the only place where transport errors get classified and the
//! only place, besides an explicit logout, where the session is cleared.

pub mod album;
pub mod artist;
pub mod player;
pub mod profile;
pub mod search;
pub mod track;

pub use album::AlbumContext;
pub use artist::ArtistContext;
pub use player::{PlayerContext, PlayerState};
pub use profile::ProfileContext;
pub use search::SearchContext;
pub use track::TrackContext;

use crate::api::MusicApi;
use crate::auth::Authenticator;
use crate::query::Query;
use crate::FetchError;
use std::future::Future;
use std::sync::Arc;

/// Shared fetch machinery handed to every context.
#[derive(Clone)]
pub struct Fetcher {
    api: Arc<dyn MusicApi>,
    auth: Arc<Authenticator>,
}

impl Fetcher {
    pub fn new(api: Arc<dyn MusicApi>, auth: Arc<Authenticator>) -> Self {
        Self { api, auth }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// Run one fetch against `query` following the context contract.
    ///
    /// The caller always receives the outcome of its own call, even when a newer
    /// fetch has since superseded it and the state was left untouched.
    pub async fn run<T, F, Fut>(
        &self,
        query: &Query<T>,
        resource: &'static str,
        call: F,
    ) -> Result<T, FetchError>
    where
        T: Clone,
        F: FnOnce(Arc<dyn MusicApi>) -> Fut,
        Fut: Future<Output = crate::Result<T>>,
    {
        let Some(identity) = self.auth.session().identity() else {
            log::debug!("Not fetching {resource}: unauthenticated");
            query.fail(FetchError::Unauthenticated);
            return Err(FetchError::Unauthenticated);
        };

        let ticket = query.begin();

        match call(Arc::clone(&self.api)).await {
            Ok(payload) => {
                if !query.resolve(ticket, Ok(payload.clone())) {
                    log::debug!("Discarding superseded {resource} response");
                }
                Ok(payload)
            }
            Err(e) if e.is_unauthorized() => {
                log::warn!("Session rejected while fetching {resource}");
                let cleared = self.auth.expire_session(&identity);
                query.resolve(ticket, Err(FetchError::SessionExpired));
                if cleared {
                    self.auth.notify_backend(&identity).await;
                }
                Err(FetchError::SessionExpired)
            }
            Err(e) => {
                log::error!("Error fetching {resource}: {e}");
                let failure = FetchError::RequestFailed { resource };
                query.resolve(ticket, Err(failure.clone()));
                Err(failure)
            }
        }
    }
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher").field("auth", &self.auth).finish()
    }
}
