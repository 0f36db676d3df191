mod common;

use common::{profile_json, ScriptedClient};
use http_types::Method;
use spotify_app_client::{
    ClientConfig, ClientError, ClientEvent, MemorySessionStorage, SessionStore, Transport,
};
use std::sync::Arc;

fn transport_for(client: &ScriptedClient, identity: Option<&str>) -> Transport {
    let storage = match identity {
        Some(identity) => MemorySessionStorage::with_identity(identity),
        None => MemorySessionStorage::new(),
    };
    let session = Arc::new(SessionStore::new(Arc::new(storage)));
    Transport::new(Box::new(client.clone()), &ClientConfig::new(), session)
}

#[test_log::test(tokio::test)]
async fn test_bearer_is_stamped_from_session() {
    let client = ScriptedClient::new();
    client.reply_json("/me/profile", &profile_json("user-42"));

    let transport = transport_for(&client, Some("user-42"));
    let response = transport.get("/me/profile").await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(
        client.requests()[0].authorization.as_deref(),
        Some("Bearer user-42")
    );
}

#[test_log::test(tokio::test)]
async fn test_no_identity_sends_no_authorization() {
    let client = ScriptedClient::new();
    client.reply("/me/profile", 401, "");

    let transport = transport_for(&client, None);
    let result = transport.get("/me/profile").await;

    assert!(matches!(result, Err(ClientError::Status { status: 401, .. })));
    assert_eq!(client.requests()[0].authorization, None);
}

#[test_log::test(tokio::test)]
async fn test_explicit_authorization_is_not_overwritten() {
    let client = ScriptedClient::new();
    client.reply("/auth/logout", 204, "");

    let transport = transport_for(&client, Some("user-42"));
    transport
        .request(
            Method::Delete,
            "/auth/logout",
            None,
            &[("Authorization", "Bearer someone-else")],
        )
        .await
        .unwrap();

    let request = &client.requests()[0];
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.authorization.as_deref(), Some("Bearer someone-else"));
}

#[test_log::test(tokio::test)]
async fn test_identity_is_read_per_request() {
    let client = ScriptedClient::new();
    let transport = transport_for(&client, None);

    let _ = transport.get("/tracks/t1").await;
    transport.session().establish("user-7").unwrap();
    let _ = transport.get("/tracks/t1").await;

    let requests = client.requests();
    assert_eq!(requests[0].authorization, None);
    assert_eq!(requests[1].authorization.as_deref(), Some("Bearer user-7"));
}

#[test_log::test(tokio::test)]
async fn test_error_status_and_body_are_preserved() {
    let client = ScriptedClient::new();
    client.reply("/albums/x", 503, "maintenance");

    let transport = transport_for(&client, Some("user-42"));
    match transport.get("/albums/x").await {
        Err(ClientError::Status { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn test_status_survives_undecodable_body() {
    let client = ScriptedClient::new();
    client.reply_bytes("/tracks/t1", 401, vec![0xff, 0xfe, 0xfd]);

    let transport = transport_for(&client, Some("user-42"));
    match transport.get("/tracks/t1").await {
        Err(ClientError::Status { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains('\u{fffd}'));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn test_request_events_are_broadcast() {
    let client = ScriptedClient::new();
    client.reply_json("/me/profile", &profile_json("user-42"));

    let transport = transport_for(&client, Some("user-42"));
    let mut events = transport.session().subscribe();
    transport.get("/me/profile").await.unwrap();

    match events.try_recv().unwrap() {
        ClientEvent::RequestStarted { request } => {
            assert_eq!(request.method, "GET");
            assert_eq!(request.path, "/me/profile");
        }
        other => panic!("unexpected event: {other:?}"),
    }
    match events.try_recv().unwrap() {
        ClientEvent::RequestCompleted {
            request,
            status_code,
            ..
        } => {
            assert_eq!(request.short_description(), "GET /me/profile");
            assert_eq!(status_code, 200);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn test_custom_api_path() {
    let client = ScriptedClient::new();
    let session = Arc::new(SessionStore::new(Arc::new(MemorySessionStorage::new())));
    let config = ClientConfig::new()
        .with_base_url("http://backend.test:9000/")
        .with_api_path("/api");
    let transport = Transport::new(Box::new(client.clone()), &config, session);

    assert_eq!(transport.api_base_url(), "http://backend.test:9000/api");
    let _ = transport.get("search?q=x").await;
    assert_eq!(client.requests()[0].path, "/search?q=x");
}
