#![allow(dead_code)]
use async_trait::async_trait;
use http_client::{Error, HttpClient, Request, Response};
use serde_json::{json, Value};
use spotify_app_client::{AppClient, ClientConfig, MemorySessionStorage, SessionStorage};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{oneshot, Notify};

/// One request as seen by [`ScriptedClient`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path and query relative to the API base, e.g. `/artists/artist1`
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Debug)]
enum Reply {
    Now(u16, Vec<u8>),
    Deferred(oneshot::Receiver<(u16, String)>),
}

#[derive(Debug, Default)]
struct Script {
    replies: HashMap<String, VecDeque<Reply>>,
    requests: Vec<RecordedRequest>,
}

/// In-process `HttpClient` that answers from a script and records every request.
///
/// Replies are queued per path. A path with nothing queued answers `404`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedClient {
    script: Arc<Mutex<Script>>,
    arrived: Arc<Notify>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, path: &str, status: u16, body: impl Into<String>) -> &Self {
        self.reply_bytes(path, status, body.into().into_bytes())
    }

    /// Queue a raw body, which need not be valid UTF-8.
    pub fn reply_bytes(&self, path: &str, status: u16, body: Vec<u8>) -> &Self {
        self.enqueue(path, Reply::Now(status, body));
        self
    }

    pub fn reply_json(&self, path: &str, body: &Value) -> &Self {
        self.reply(path, 200, body.to_string())
    }

    /// Queue a reply that is only sent once the returned sender fires.
    pub fn defer(&self, path: &str) -> oneshot::Sender<(u16, String)> {
        let (tx, rx) = oneshot::channel();
        self.enqueue(path, Reply::Deferred(rx));
        tx
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.script.lock().unwrap().requests.len()
    }

    /// Wait until at least `count` requests have arrived.
    pub async fn wait_for_requests(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let notified = self.arrived.notified();
                if self.request_count() >= count {
                    return;
                }
                notified.await;
            }
        })
        .await
        .expect("timed out waiting for requests");
    }

    fn enqueue(&self, path: &str, reply: Reply) {
        self.script
            .lock()
            .unwrap()
            .replies
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
    }
}

#[async_trait]
impl HttpClient for ScriptedClient {
    async fn send(&self, req: Request) -> Result<Response, Error> {
        let url = req.url();
        let relative = url.path().strip_prefix("/api").unwrap_or(url.path());
        let path = match url.query() {
            Some(query) => format!("{relative}?{query}"),
            None => relative.to_string(),
        };

        let reply = {
            let mut script = self.script.lock().unwrap();
            script.requests.push(RecordedRequest {
                method: req.method().to_string(),
                path: path.clone(),
                authorization: req.header("Authorization").map(|v| v.as_str().to_string()),
            });
            script.replies.get_mut(&path).and_then(VecDeque::pop_front)
        };
        self.arrived.notify_waiters();

        let (status, body) = match reply {
            Some(Reply::Now(status, body)) => (status, body),
            Some(Reply::Deferred(rx)) => rx
                .await
                .map(|(status, body)| (status, body.into_bytes()))
                .map_err(|_| Error::from_str(500, "deferred reply dropped"))?,
            None => (404, json!({ "error": "not found" }).to_string().into_bytes()),
        };

        let mut response = Response::new(status);
        response.set_body(body);
        Ok(response)
    }
}

/// Build an app over `client` with in-memory storage, optionally pre-authenticated.
pub fn app_with(
    client: &ScriptedClient,
    identity: Option<&str>,
) -> (AppClient, Arc<MemorySessionStorage>) {
    let storage = Arc::new(match identity {
        Some(identity) => MemorySessionStorage::with_identity(identity),
        None => MemorySessionStorage::new(),
    });
    let shared: Arc<dyn SessionStorage> = storage.clone();
    let app = AppClient::new(Box::new(client.clone()), ClientConfig::new(), shared);
    (app, storage)
}

pub fn artist_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": "artist",
        "uri": format!("spotify:artist:{id}"),
        "genres": ["rock"],
        "popularity": 71,
        "followers": { "href": null, "total": 1200 },
        "images": [{ "url": format!("https://i.scdn.co/image/{id}"), "height": 640, "width": 640 }],
        "external_urls": { "spotify": format!("https://open.spotify.com/artist/{id}") }
    })
}

pub fn track_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "duration_ms": 215000,
        "track_number": 1,
        "artists": [{ "id": "artist1", "name": "Artist One" }],
        "album": { "id": "album1", "name": "Album One", "images": [] },
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{id}") }
    })
}

pub fn album_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "album_type": "album",
        "release_date": "2001-03-07",
        "total_tracks": 1,
        "artists": [{ "id": "artist1", "name": "Artist One" }],
        "images": [],
        "tracks": page_json(vec![track_json("t1", "Track One")], 0, None)
    })
}

pub fn page_json(items: Vec<Value>, offset: u32, next: Option<&str>) -> Value {
    json!({
        "items": items,
        "limit": 20,
        "offset": offset,
        "total": 100,
        "next": next,
        "previous": null
    })
}

pub fn profile_json(id: &str) -> Value {
    json!({
        "id": id,
        "display_name": "Test User",
        "email": "test@example.com",
        "country": "SE",
        "product": "premium",
        "followers": { "total": 3 },
        "images": []
    })
}
