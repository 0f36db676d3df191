use crate::events::{ClientEvent, RequestInfo, SharedEventBroadcaster};
use crate::headers::{add_bearer, add_common_headers, add_explicit_headers, add_json_body_headers};
use crate::session::SessionStore;
use crate::{ClientConfig, ClientError, Result};
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Body and status of a successful backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| ClientError::Parse(e.to_string()))
    }
}

/// HTTP client bound to the backend's API base path.
///
/// Every outgoing request is stamped with the session identity as a bearer
/// credential, unless the caller already declared an `Authorization` header. The
/// identity is read from the [`SessionStore`] at call time, so an identity that
/// changes is picked up by the next call without rebuilding the transport.
///
/// Non-2xx responses come back as [`ClientError::Status`] with the status code
/// intact, even when the body cannot be decoded. The transport never retries
/// and never classifies failures.
///
/// Cloning is cheap; clones share the HTTP client, session and broadcaster.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use spotify_app_client::{ClientConfig, MemorySessionStorage, SessionStore, Transport};
///
/// # async fn example() -> spotify_app_client::Result<()> {
/// let session = Arc::new(SessionStore::new(Arc::new(MemorySessionStorage::new())));
/// let transport = Transport::new(
///     Box::new(http_client::native::NativeClient::new()),
///     &ClientConfig::new(),
///     session,
/// );
///
/// let response = transport.get("/me/profile").await?;
/// println!("{}", response.body);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Transport {
    client: Arc<dyn HttpClient + Send + Sync>,
    api_base_url: String,
    session: Arc<SessionStore>,
    broadcaster: Arc<SharedEventBroadcaster>,
}

impl Transport {
    pub fn new(
        client: Box<dyn HttpClient + Send + Sync>,
        config: &ClientConfig,
        session: Arc<SessionStore>,
    ) -> Self {
        let broadcaster = session.broadcaster();
        Self {
            client: Arc::from(client),
            api_base_url: config.api_base_url(),
            session,
            broadcaster,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Issue a GET request to `path`.
    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.request(Method::Get, path, None, &[]).await
    }

    /// Issue a request to `path`, relative to the API base.
    ///
    /// `headers` are applied after the defaults. An `Authorization` entry there
    /// suppresses the session bearer.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        headers: &[(&str, &str)],
    ) -> Result<ApiResponse> {
        let url = self.url_for(path)?;
        let request_info = RequestInfo::new(&method.to_string(), path);
        let mut request = Request::new(method, url);

        add_common_headers(&mut request);
        if let Some(body) = body {
            add_json_body_headers(&mut request);
            request.set_body(body.to_string());
        }
        add_explicit_headers(&mut request, headers);
        add_bearer(&mut request, self.session.identity().as_deref());

        log::debug!("Sending {}", request_info.short_description());
        self.broadcaster.broadcast_event(ClientEvent::RequestStarted {
            request: request_info.clone(),
        });
        let request_start = std::time::Instant::now();

        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;

        let status: u16 = response.status().into();
        self.broadcaster
            .broadcast_event(ClientEvent::RequestCompleted {
                request: request_info.clone(),
                status_code: status,
                duration_ms: request_start.elapsed().as_millis() as u64,
            });

        if !response.status().is_success() {
            log::debug!(
                "{} failed with status {status}",
                request_info.short_description()
            );
            // The status must survive an unreadable error body.
            let body = match response.body_bytes().await {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    log::debug!("Could not read error body: {e}");
                    String::new()
                }
            };
            return Err(ClientError::Status { status, body });
        }

        let body = response
            .body_string()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        let url = format!("{}/{}", self.api_base_url, path.trim_start_matches('/'));
        url.parse::<Url>()
            .map_err(|e| ClientError::InvalidUrl(format!("{url}: {e}")))
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("api_base_url", &self.api_base_url)
            .field("session", &self.session)
            .finish()
    }
}
