use crate::FetchError;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Outcome of the latest fetch for one logical resource.
///
/// `pending` is true only between initiation and resolution. At resolution exactly
/// one of `payload` and `failure` is set. While a new fetch is pending, the previous
/// payload stays visible.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub payload: Option<T>,
    pub pending: bool,
    pub failure: Option<FetchError>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            payload: None,
            pending: false,
            failure: None,
        }
    }
}

impl<T> QueryState<T> {
    /// Nothing has been fetched yet and nothing is in flight.
    pub fn is_idle(&self) -> bool {
        self.payload.is_none() && self.failure.is_none() && !self.pending
    }
}

/// Identifies one initiated fetch. Only the newest ticket may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Container for one [`QueryState`], shared by a context and its consumers.
///
/// Each fetch takes a [`Ticket`] with [`begin`](Self::begin) and hands it back to
/// [`resolve`](Self::resolve). A resolution whose ticket has been superseded by a
/// later `begin` is discarded, so a slow early response can never overwrite the
/// outcome of a newer request. Ticket issue and commit happen inside the same
/// critical section of the underlying `watch` channel.
///
/// # Examples
///
/// ```rust
/// use spotify_app_client::Query;
///
/// # tokio_test::block_on(async {
/// let query: Query<String> = Query::new();
/// let mut states = query.subscribe();
///
/// let older = query.begin();
/// let newer = query.begin();
/// query.resolve(newer, Ok("fresh".to_string()));
/// assert!(!query.resolve(older, Ok("stale".to_string())));
///
/// states.changed().await.unwrap();
/// assert_eq!(states.borrow().payload.as_deref(), Some("fresh"));
/// # });
/// ```
pub struct Query<T> {
    state: watch::Sender<QueryState<T>>,
    latest: AtomicU64,
}

impl<T: Clone> Query<T> {
    pub fn new() -> Self {
        let (state, _) = watch::channel(QueryState::default());
        Self {
            state,
            latest: AtomicU64::new(0),
        }
    }

    /// Mark a new fetch as in flight and clear any previous failure.
    pub fn begin(&self) -> Ticket {
        let mut ticket = Ticket(0);
        self.state.send_modify(|state| {
            ticket = Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1);
            state.pending = true;
            state.failure = None;
        });
        ticket
    }

    /// Commit the outcome of the fetch identified by `ticket`.
    ///
    /// Returns `false`, leaving the state untouched, when a newer fetch has begun
    /// since.
    pub fn resolve(&self, ticket: Ticket, outcome: Result<T, FetchError>) -> bool {
        self.state.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != ticket.0 {
                return false;
            }
            state.pending = false;
            match outcome {
                Ok(payload) => {
                    state.payload = Some(payload);
                    state.failure = None;
                }
                Err(failure) => {
                    state.payload = None;
                    state.failure = Some(failure);
                }
            }
            true
        })
    }

    /// Record a failure for a fetch that never reached the network.
    ///
    /// This counts as the newest fetch, so anything still in flight is discarded.
    pub fn fail(&self, failure: FetchError) {
        let ticket = self.begin();
        self.resolve(ticket, Err(failure));
    }

    /// Drop any payload or failure and invalidate in-flight fetches.
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            self.latest.fetch_add(1, Ordering::SeqCst);
            *state = QueryState::default();
        });
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> QueryState<T> {
        self.state.borrow().clone()
    }

    pub fn payload(&self) -> Option<T> {
        self.state.borrow().payload.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.state.borrow().pending
    }

    pub fn failure(&self) -> Option<FetchError> {
        self.state.borrow().failure.clone()
    }

    /// Watch for state changes.
    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.state.subscribe()
    }
}

impl<T: Clone> Default for Query<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("state", &*self.state.borrow())
            .field("latest", &self.latest.load(Ordering::SeqCst))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_and_resolve() {
        let query: Query<&str> = Query::new();
        assert!(query.snapshot().is_idle());

        let ticket = query.begin();
        assert!(query.is_pending());

        assert!(query.resolve(ticket, Ok("payload")));
        let state = query.snapshot();
        assert_eq!(state.payload, Some("payload"));
        assert!(!state.pending);
        assert_eq!(state.failure, None);
    }

    #[test]
    fn test_stale_resolution_is_discarded() {
        let query: Query<&str> = Query::new();

        let first = query.begin();
        let second = query.begin();

        assert!(query.resolve(second, Ok("newer")));
        assert!(!query.resolve(first, Ok("older")));

        assert_eq!(query.payload(), Some("newer"));
        assert!(!query.is_pending());
    }

    #[test]
    fn test_stale_failure_does_not_clobber_pending() {
        let query: Query<&str> = Query::new();

        let first = query.begin();
        let _second = query.begin();
        assert!(!query.resolve(first, Err(FetchError::SessionExpired)));

        let state = query.snapshot();
        assert!(state.pending);
        assert_eq!(state.failure, None);
    }

    #[test]
    fn test_payload_retained_while_pending_and_replaced_by_failure() {
        let query: Query<&str> = Query::new();
        let ticket = query.begin();
        query.resolve(ticket, Ok("first"));

        let ticket = query.begin();
        assert_eq!(query.payload(), Some("first"));
        assert!(query.is_pending());

        query.resolve(ticket, Err(FetchError::RequestFailed { resource: "artist" }));
        let state = query.snapshot();
        assert_eq!(state.payload, None);
        assert_eq!(
            state.failure,
            Some(FetchError::RequestFailed { resource: "artist" })
        );
    }

    #[test]
    fn test_fail_supersedes_in_flight() {
        let query: Query<&str> = Query::new();
        let in_flight = query.begin();

        query.fail(FetchError::Unauthenticated);
        assert!(!query.resolve(in_flight, Ok("late")));
        assert_eq!(query.failure(), Some(FetchError::Unauthenticated));
        assert!(!query.is_pending());
    }

    #[test]
    fn test_reset_invalidates_in_flight() {
        let query: Query<&str> = Query::new();
        let ticket = query.begin();
        query.reset();

        assert!(!query.resolve(ticket, Ok("late")));
        assert!(query.snapshot().is_idle());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let query: Query<u32> = Query::new();
        let mut rx = query.subscribe();

        let ticket = query.begin();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().pending);

        query.resolve(ticket, Ok(7));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().payload, Some(7));
    }
}
