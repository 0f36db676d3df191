use crate::events::{ClearReason, ClientEvent, ClientEventReceiver, SharedEventBroadcaster};
use crate::storage::SessionStorage;
use crate::{ClientError, Result};
use chrono::Utc;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

/// Process-wide holder of the current session identity.
///
/// The store is a two-state machine: unauthenticated (no identity) and
/// authenticated (identity present). Durable storage and the in-memory value are
/// always changed under the same write lock, so readers never see them disagree.
///
/// Share one store through `Arc` with every consumer; readers must call
/// [`identity`](Self::identity) at the moment they need it rather than caching it.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use spotify_app_client::{ClearReason, MemorySessionStorage, SessionStore};
///
/// let store = SessionStore::new(Arc::new(MemorySessionStorage::new()));
/// assert!(!store.is_authenticated());
///
/// store.establish("user-42")?;
/// assert!(store.is_authenticated());
///
/// assert_eq!(store.clear(ClearReason::Logout), Some("user-42".to_string()));
/// assert!(!store.is_authenticated());
/// # Ok::<(), spotify_app_client::ClientError>(())
/// ```
pub struct SessionStore {
    identity: RwLock<Option<String>>,
    storage: Arc<dyn SessionStorage>,
    broadcaster: Arc<SharedEventBroadcaster>,
}

impl SessionStore {
    /// Create a store and rehydrate it from `storage`.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self::with_broadcaster(storage, Arc::new(SharedEventBroadcaster::new()))
    }

    /// Create a store that publishes session events on an existing broadcaster.
    ///
    /// A stored value that cannot be read is discarded and the store starts
    /// unauthenticated.
    pub fn with_broadcaster(
        storage: Arc<dyn SessionStorage>,
        broadcaster: Arc<SharedEventBroadcaster>,
    ) -> Self {
        let identity = match storage.load() {
            Ok(identity) => identity,
            Err(e) => {
                log::warn!("Discarding unreadable stored session: {e}");
                if let Err(e) = storage.remove() {
                    log::error!("Failed to remove unreadable stored session: {e}");
                }
                None
            }
        };

        if identity.is_some() {
            log::debug!("Rehydrated session from durable storage");
        }

        Self {
            identity: RwLock::new(identity),
            storage,
            broadcaster,
        }
    }

    /// Move to the authenticated state with `identity`.
    ///
    /// The identity is persisted before it becomes visible. An empty or
    /// whitespace-only identity is rejected and leaves the state unchanged, as
    /// does a storage failure.
    pub fn establish(&self, identity: &str) -> Result<()> {
        if identity.trim().is_empty() {
            return Err(ClientError::InvalidIdentity(
                "session identity must not be empty".to_string(),
            ));
        }

        {
            let mut current = self.write();
            self.storage.save(identity)?;
            *current = Some(identity.to_string());
        }

        log::debug!("Session established");
        self.broadcaster
            .broadcast_event(ClientEvent::SessionEstablished {
                timestamp: Utc::now(),
            });
        Ok(())
    }

    /// Move to the unauthenticated state.
    ///
    /// Returns the identity that was cleared, or `None` if there was no session,
    /// in which case nothing happens. Local state always wins: a storage failure
    /// is logged and the in-memory session is cleared regardless.
    pub fn clear(&self, reason: ClearReason) -> Option<String> {
        let mut current = self.write();
        let previous = current.take()?;
        self.remove_stored();
        drop(current);

        self.announce_cleared(reason);
        Some(previous)
    }

    /// Clear the session only if `identity` is still the live one.
    ///
    /// A rejection that belongs to an identity which has since been replaced
    /// must not log out the newer session.
    pub fn clear_if_current(&self, identity: &str, reason: ClearReason) -> bool {
        let mut current = self.write();
        if current.as_deref() != Some(identity) {
            log::debug!("Ignoring {reason:?} for a session that is no longer current");
            return false;
        }
        *current = None;
        self.remove_stored();
        drop(current);

        self.announce_cleared(reason);
        true
    }

    /// The current identity, read at call time.
    pub fn identity(&self) -> Option<String> {
        self.identity
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether an identity is present.
    pub fn is_authenticated(&self) -> bool {
        self.identity
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Subscribe to session and request events.
    pub fn subscribe(&self) -> ClientEventReceiver {
        self.broadcaster.subscribe()
    }

    pub fn broadcaster(&self) -> Arc<SharedEventBroadcaster> {
        Arc::clone(&self.broadcaster)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<String>> {
        self.identity.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop the persisted identity. When removal fails the stored value is
    /// blanked instead, since storage never loads an empty identity.
    fn remove_stored(&self) {
        let Err(e) = self.storage.remove() else {
            return;
        };
        log::warn!("Failed to remove stored session, blanking it instead: {e}");
        if let Err(e) = self.storage.save("") {
            log::error!("Failed to blank stored session: {e}");
        }
    }

    fn announce_cleared(&self, reason: ClearReason) {
        log::debug!("Session cleared ({reason:?})");
        self.broadcaster.broadcast_event(ClientEvent::SessionCleared {
            timestamp: Utc::now(),
            reason,
        });
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySessionStorage;

    struct FailingStorage;

    impl SessionStorage for FailingStorage {
        fn load(&self) -> Result<Option<String>> {
            Err(ClientError::Storage("unreadable".to_string()))
        }

        fn save(&self, _identity: &str) -> Result<()> {
            Err(ClientError::Storage("read-only".to_string()))
        }

        fn remove(&self) -> Result<()> {
            Err(ClientError::Storage("read-only".to_string()))
        }
    }

    /// Memory storage whose `remove` always fails.
    struct UndeletableStorage(Arc<MemorySessionStorage>);

    impl SessionStorage for UndeletableStorage {
        fn load(&self) -> Result<Option<String>> {
            self.0.load()
        }

        fn save(&self, identity: &str) -> Result<()> {
            self.0.save(identity)
        }

        fn remove(&self) -> Result<()> {
            Err(ClientError::Storage("permission denied".to_string()))
        }
    }

    fn store_with_memory() -> (SessionStore, Arc<MemorySessionStorage>) {
        let storage = Arc::new(MemorySessionStorage::new());
        (SessionStore::new(storage.clone()), storage)
    }

    #[test]
    fn test_establish_and_clear_round_trip() {
        let (store, storage) = store_with_memory();

        store.establish("user-42").unwrap();
        assert_eq!(storage.get(), Some("user-42".to_string()));
        assert_eq!(store.identity(), Some("user-42".to_string()));

        store.clear(ClearReason::Logout);
        assert_eq!(storage.get(), None);
        assert_eq!(store.identity(), None);
    }

    #[test]
    fn test_clear_when_unauthenticated_is_noop() {
        let (store, storage) = store_with_memory();
        let mut events = store.subscribe();

        assert_eq!(store.clear(ClearReason::Logout), None);
        assert_eq!(store.clear(ClearReason::Unauthorized), None);
        assert!(!store.is_authenticated());
        assert_eq!(storage.get(), None);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_empty_identity_is_rejected() {
        let (store, storage) = store_with_memory();
        store.establish("user-1").unwrap();

        assert!(matches!(
            store.establish("   "),
            Err(ClientError::InvalidIdentity(_))
        ));
        assert_eq!(store.identity(), Some("user-1".to_string()));
        assert_eq!(storage.get(), Some("user-1".to_string()));
    }

    #[test]
    fn test_rehydrates_from_storage() {
        let storage = Arc::new(MemorySessionStorage::with_identity("stored-user"));
        let store = SessionStore::new(storage);
        assert!(store.is_authenticated());
        assert_eq!(store.identity(), Some("stored-user".to_string()));
    }

    #[test]
    fn test_unreadable_storage_starts_unauthenticated() {
        let store = SessionStore::new(Arc::new(FailingStorage));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_failed_persist_keeps_previous_state() {
        let store = SessionStore::new(Arc::new(FailingStorage));
        assert!(store.establish("user-1").is_err());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_clear_if_current_ignores_replaced_identity() {
        let (store, _storage) = store_with_memory();
        store.establish("old").unwrap();
        store.establish("new").unwrap();

        assert!(!store.clear_if_current("old", ClearReason::Unauthorized));
        assert_eq!(store.identity(), Some("new".to_string()));

        assert!(store.clear_if_current("new", ClearReason::Unauthorized));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_failed_removal_does_not_resurrect_identity() {
        let memory = Arc::new(MemorySessionStorage::new());
        let storage: Arc<dyn SessionStorage> =
            Arc::new(UndeletableStorage(Arc::clone(&memory)));

        let store = SessionStore::new(Arc::clone(&storage));
        store.establish("user-42").unwrap();
        store.clear(ClearReason::Unauthorized);
        assert!(!store.is_authenticated());
        assert_eq!(memory.load().unwrap(), None);

        let restarted = SessionStore::new(storage);
        assert!(!restarted.is_authenticated());
    }

    #[test]
    fn test_events_are_broadcast() {
        let (store, _storage) = store_with_memory();
        let mut events = store.subscribe();

        store.establish("user-42").unwrap();
        store.clear(ClearReason::Unauthorized);

        assert!(matches!(
            events.try_recv().unwrap(),
            ClientEvent::SessionEstablished { .. }
        ));
        assert!(matches!(
            events.try_recv().unwrap(),
            ClientEvent::SessionCleared {
                reason: ClearReason::Unauthorized,
                ..
            }
        ));
    }
}
