//! # Client Events
//!
//! This module provides a broadcast channel system for emitting request and session
//! lifecycle events that consumers can listen to and react to, e.g. a view layer
//! that routes back to the login page when the session is cleared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};

/// Request information for client events
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestInfo {
    /// The HTTP method (GET, DELETE, ...)
    pub method: String,
    /// Path relative to the API base, including any query string
    pub path: String,
}

impl RequestInfo {
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
        }
    }

    /// Get a short description of the request for logging
    pub fn short_description(&self) -> String {
        let path = match self.path.split_once('?') {
            Some((path, _)) => path,
            None => &self.path,
        };
        format!("{} {}", self.method, path)
    }
}

/// Why a session was cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClearReason {
    /// The user asked to log out
    Logout,
    /// A request was answered with `401`
    Unauthorized,
}

/// Event type to describe client activity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClientEvent {
    /// Request started
    RequestStarted {
        /// Request details
        request: RequestInfo,
    },
    /// Request finished with a response from the backend, successful or not
    RequestCompleted {
        /// Request details
        request: RequestInfo,
        /// HTTP status code
        status_code: u16,
        /// Duration of the request in milliseconds
        duration_ms: u64,
    },
    /// A session identity was established
    SessionEstablished {
        /// When the session was established
        timestamp: DateTime<Utc>,
    },
    /// The session was cleared
    SessionCleared {
        /// When the session was cleared
        timestamp: DateTime<Utc>,
        /// What triggered the transition
        reason: ClearReason,
    },
}

/// Type alias for the broadcast receiver
pub type ClientEventReceiver = broadcast::Receiver<ClientEvent>;

/// Type alias for the watch receiver
pub type ClientEventWatcher = watch::Receiver<Option<ClientEvent>>;

/// Shared event broadcasting state, handed by `Arc` to the transport and session store
#[derive(Clone)]
pub struct SharedEventBroadcaster {
    event_tx: broadcast::Sender<ClientEvent>,
    last_event_tx: watch::Sender<Option<ClientEvent>>,
}

impl SharedEventBroadcaster {
    /// Create a new shared event broadcaster
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let (last_event_tx, _) = watch::channel(None);

        Self {
            event_tx,
            last_event_tx,
        }
    }

    /// Broadcast an event to all subscribers
    pub fn broadcast_event(&self, event: ClientEvent) {
        let _ = self.event_tx.send(event.clone());
        self.last_event_tx.send_replace(Some(event));
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> ClientEventReceiver {
        self.event_tx.subscribe()
    }

    /// Watch the most recent event
    pub fn watch(&self) -> ClientEventWatcher {
        self.last_event_tx.subscribe()
    }

    /// Get the latest event
    pub fn latest_event(&self) -> Option<ClientEvent> {
        self.last_event_tx.borrow().clone()
    }
}

impl Default for SharedEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SharedEventBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEventBroadcaster")
            .field("subscribers", &self.event_tx.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_description_drops_query() {
        let info = RequestInfo::new("GET", "/search?q=abba&type=track");
        assert_eq!(info.short_description(), "GET /search");
    }

    #[tokio::test]
    async fn test_broadcast_and_latest() {
        let broadcaster = SharedEventBroadcaster::new();
        let mut rx = broadcaster.subscribe();
        assert!(broadcaster.latest_event().is_none());

        let event = ClientEvent::RequestStarted {
            request: RequestInfo::new("GET", "/tracks/1"),
        };
        broadcaster.broadcast_event(event.clone());

        assert_eq!(rx.recv().await.unwrap(), event);
        assert_eq!(broadcaster.latest_event(), Some(event));
    }

    #[tokio::test]
    async fn test_watch_sees_latest_only() {
        let broadcaster = SharedEventBroadcaster::new();
        let mut watcher = broadcaster.watch();

        broadcaster.broadcast_event(ClientEvent::RequestStarted {
            request: RequestInfo::new("GET", "/tracks/1"),
        });
        broadcaster.broadcast_event(ClientEvent::SessionCleared {
            timestamp: Utc::now(),
            reason: ClearReason::Logout,
        });

        watcher.changed().await.unwrap();
        assert!(matches!(
            *watcher.borrow_and_update(),
            Some(ClientEvent::SessionCleared {
                reason: ClearReason::Logout,
                ..
            })
        ));
    }
}
