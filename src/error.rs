use thiserror::Error;

/// Raw errors produced by the transport, storage and session layers.
///
/// These are what [`Transport`](crate::Transport) and the resource services return.
/// Consumers that render UI should not match on these directly; the resource
/// contexts turn them into a [`FetchError`].
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use spotify_app_client::{ClientError, Transport};
///
/// # async fn example(transport: &Transport) {
/// match transport.get("/me/profile").await {
///     Ok(response) => println!("{} bytes", response.body.len()),
///     Err(ClientError::Status { status: 401, .. }) => eprintln!("session rejected"),
///     Err(ClientError::Http(msg)) => eprintln!("Network error: {}", msg),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # }
/// ```
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP/network related errors.
    ///
    /// This includes connection failures, timeouts, DNS errors and failures
    /// to read a response body.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend answered with a non-2xx status.
    ///
    /// The status code is preserved untouched so that callers can classify it.
    #[error("Request failed with status {status}")]
    Status {
        /// HTTP status code returned by the backend
        status: u16,
        /// Raw response body, possibly empty
        body: String,
    },

    /// Failed to decode a response payload.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A URL could not be built from the configured base and the request path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A session identity was missing or empty.
    #[error("Invalid session identity: {0}")]
    InvalidIdentity(String),

    /// Durable session storage could not be read or written.
    #[error("Session storage error: {0}")]
    Storage(String),

    /// File system I/O errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// HTTP status code carried by this error, if the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the session credential.
    ///
    /// `401` is the only status that invalidates the session.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Classified outcome of a failed resource fetch.
///
/// This is the only error type the view layer is expected to depend on. Match on
/// the variant; the display text is meant for people, not for branching.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No session was present, so no request was attempted.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// The backend rejected the session credential and the session was cleared.
    #[error("Session expired. Log in again.")]
    SessionExpired,

    /// Any other failure: network, non-401 status, malformed payload.
    #[error("Failed to load {resource}. Try again.")]
    RequestFailed {
        /// Human readable name of the resource that failed to load
        resource: &'static str,
    },
}

impl FetchError {
    /// Whether the consumer should be routed back to the unauthenticated view.
    pub fn requires_login(&self) -> bool {
        matches!(self, FetchError::Unauthenticated | FetchError::SessionExpired)
    }

    /// Whether the failure can be shown inline with a retry affordance.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::RequestFailed { .. })
    }
}
