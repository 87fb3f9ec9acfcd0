use crate::config::{ClientConfig, StorageBackend};
use crate::error::ClientError;
use crate::services::Services;
use crate::sources::DataSource;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::token_store::TokenStore;
use crate::SessionState;
use mockito::{Matcher, Server};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::sync::Arc;
use tahfeez_core::{
    messages, storage_keys, Credentials, Language, LocaleFilter, MessageFilters, RegisterRequest,
};

fn config_for(base_url: &str, use_api: bool, mock_auth: bool) -> ClientConfig {
    ClientConfig {
        base_url: base_url.to_string(),
        use_api,
        mock_auth,
        mock_delay_ms: 0,
        storage: StorageBackend::Memory,
        ..ClientConfig::default()
    }
}

fn build(base_url: &str, use_api: bool, mock_auth: bool) -> (Services, MemoryStore) {
    let store = MemoryStore::default();
    let services = Services::create(
        config_for(base_url, use_api, mock_auth),
        Arc::new(store.clone()),
    )
    .expect("services");
    (services, store)
}

fn build_signed_in(base_url: &str, access: &str, refresh: &str) -> (Services, MemoryStore) {
    let store = MemoryStore::default();
    store
        .set_many(&[
            (storage_keys::ACCESS_TOKEN, access),
            (storage_keys::REFRESH_TOKEN, refresh),
        ])
        .expect("seed tokens");
    let services = Services::create(
        config_for(base_url, true, false),
        Arc::new(store.clone()),
    )
    .expect("services");
    (services, store)
}

fn goal_body(id: u64, progress: u8) -> Value {
    json!({
        "id": id,
        "title": "Walk every day",
        "description": "",
        "scope": 1,
        "status": "active",
        "progress_percentage": progress,
        "target_date": null,
        "created_at": "2024-03-01T08:00:00Z",
        "updated_at": "2024-03-02T08:00:00Z",
        "completed_at": null
    })
}

fn top_level_keys(value: &Value) -> BTreeSet<String> {
    value
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn unauthorized_request_refreshes_once_and_retries_once() {
    let mut server = Server::new_async().await;
    let goal = server
        .mock("GET", "/v1/goals/1/")
        .with_status(401)
        .with_body(json!({"detail": "Given token not valid for any token type"}).to_string())
        .expect(2)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/v1/auth/token/refresh/")
        .match_body(Matcher::Json(json!({"refresh": "r-1"})))
        .with_status(200)
        .with_body(json!({"access": "a-2"}).to_string())
        .expect(1)
        .create_async()
        .await;

    let (services, _store) = build_signed_in(&server.url(), "a-1", "r-1");
    let response = services.data.goal(1).await.expect("envelope");

    assert!(!response.success);
    assert_eq!(
        response.error.as_deref(),
        Some("Given token not valid for any token type")
    );
    goal.assert_async().await;
    refresh.assert_async().await;
    assert_eq!(services.tokens.access_token().as_deref(), Some("a-2"));
    assert_eq!(services.tokens.refresh_token().as_deref(), Some("r-1"));
}

#[tokio::test]
async fn failed_refresh_returns_original_unauthorized_response() {
    let mut server = Server::new_async().await;
    let goal = server
        .mock("GET", "/v1/goals/1/")
        .with_status(401)
        .with_body(json!({"detail": "Access token expired"}).to_string())
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/v1/auth/token/refresh/")
        .with_status(401)
        .with_body(json!({"detail": "Token is blacklisted"}).to_string())
        .expect(1)
        .create_async()
        .await;

    let (services, store) = build_signed_in(&server.url(), "a-1", "r-1");
    let response = services.data.goal(1).await.expect("envelope");

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Access token expired"));
    goal.assert_async().await;
    refresh.assert_async().await;
    assert!(services.tokens.access_token().is_none());
    assert!(store.is_empty());
    assert_eq!(services.auth.session_state(), SessionState::LoggedOut);
}

#[tokio::test]
async fn rejected_refresh_clears_session() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/auth/token/refresh/")
        .with_status(401)
        .with_body(json!({"detail": "Token is blacklisted"}).to_string())
        .create_async()
        .await;

    let (services, store) = build_signed_in(&server.url(), "a-1", "r-1");
    assert_eq!(services.auth.session_state(), SessionState::LoggedIn);

    let response = services.auth.refresh_access_token().await;

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some(messages::SESSION_EXPIRED));
    assert!(services.tokens.access_token().is_none());
    assert!(services.tokens.refresh_token().is_none());
    assert!(store.is_empty());
    assert_eq!(services.auth.session_state(), SessionState::LoggedOut);
}

#[tokio::test]
async fn refresh_without_token_makes_no_request() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("POST", "/v1/auth/token/refresh/")
        .expect(0)
        .create_async()
        .await;

    let (services, _store) = build(&server.url(), true, false);
    let response = services.auth.refresh_access_token().await;

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some(messages::NO_REFRESH_TOKEN));
    refresh.assert_async().await;
}

#[tokio::test]
async fn refresh_network_failure_keeps_tokens() {
    let (services, _store) = build_signed_in("http://127.0.0.1:9", "a-1", "r-1");
    let response = services.auth.refresh_access_token().await;

    assert!(!response.success);
    assert_ne!(response.error.as_deref(), Some(messages::SESSION_EXPIRED));
    assert_eq!(services.tokens.access_token().as_deref(), Some("a-1"));
}

#[tokio::test]
async fn progress_update_survives_expired_access_token() {
    let mut server = Server::new_async().await;
    server
        .mock("PATCH", "/v1/goals/7/update_progress/")
        .match_header("authorization", "Bearer a-1")
        .with_status(401)
        .with_body(json!({"detail": "Token expired"}).to_string())
        .expect(1)
        .create_async()
        .await;
    server
        .mock("POST", "/v1/auth/token/refresh/")
        .with_status(200)
        .with_body(json!({"access": "a-2", "refresh": "r-2"}).to_string())
        .expect(1)
        .create_async()
        .await;
    let retried = server
        .mock("PATCH", "/v1/goals/7/update_progress/")
        .match_header("authorization", "Bearer a-2")
        .match_body(Matcher::Json(
            json!({"progress_percentage": 60, "language": "en"}),
        ))
        .with_status(200)
        .with_body(goal_body(7, 60).to_string())
        .expect(1)
        .create_async()
        .await;

    let (services, _store) = build_signed_in(&server.url(), "a-1", "r-1");
    let response = services
        .data
        .update_goal_progress(7, 60)
        .await
        .expect("envelope");

    assert!(response.success);
    assert_eq!(
        response.data.map(|goal| goal.progress_percentage),
        Some(60)
    );
    retried.assert_async().await;
    assert_eq!(services.tokens.refresh_token().as_deref(), Some("r-2"));
}

#[tokio::test]
async fn concurrent_unauthorized_requests_share_one_refresh() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/messages/daily/")
        .match_header("authorization", "Bearer a-1")
        .with_status(401)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/v1/auth/token/refresh/")
        .with_status(200)
        .with_body(json!({"access": "a-2", "refresh": "r-2"}).to_string())
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/v1/messages/daily/")
        .match_header("authorization", "Bearer a-2")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let (services, _store) = build_signed_in(&server.url(), "a-1", "r-1");
    let (first, second) = tokio::join!(
        services.data.daily_messages(LocaleFilter::default()),
        services.data.daily_messages(LocaleFilter::default()),
    );

    assert!(first.expect("first").success);
    assert!(second.expect("second").success);
    refresh.assert_async().await;
}

#[tokio::test]
async fn mock_login_is_deterministic() {
    let (services, _store) = build("http://127.0.0.1:9", false, true);

    let denied = services
        .auth
        .login(&Credentials::new("admin", "wrong-password"))
        .await;
    assert!(!denied.success);
    assert_eq!(denied.error.as_deref(), Some(messages::INVALID_CREDENTIALS));
    assert_eq!(services.auth.session_state(), SessionState::LoggedOut);

    let blank = services.auth.login(&Credentials::new("", "")).await;
    assert_eq!(blank.error.as_deref(), Some(messages::CREDENTIALS_REQUIRED));

    for _ in 0..2 {
        let granted = services
            .auth
            .login(&Credentials::new("admin", "admin123456"))
            .await;
        let tokens = granted.data.expect("tokens");
        assert_eq!(tokens.access, "mock_access_token_admin");
        assert_eq!(tokens.refresh, "mock_refresh_token_admin");
        assert_eq!(services.auth.current_user().map(|user| user.id), Some(1));
    }
    assert_eq!(services.auth.session_state(), SessionState::LoggedIn);
}

#[tokio::test]
async fn mock_refresh_restores_logged_in_state() {
    let (services, _store) = build("http://127.0.0.1:9", false, true);
    assert_eq!(services.auth.session_state(), SessionState::LoggedOut);
    services
        .tokens
        .set_tokens("stale", "mock_refresh_token_admin")
        .expect("seed tokens");

    let response = services.auth.refresh_access_token().await;

    assert_eq!(
        response.data.map(|tokens| tokens.access).as_deref(),
        Some("mock_access_token_admin")
    );
    assert_eq!(services.auth.session_state(), SessionState::LoggedIn);
}

#[tokio::test]
async fn corrupt_storage_file_does_not_block_login() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{truncated").expect("write corrupt file");
    let services = Services::create(
        config_for("http://127.0.0.1:9", false, true),
        Arc::new(FileStore::new(path.clone())),
    )
    .expect("services");

    let first = services
        .auth
        .login(&Credentials::new("admin", "admin123456"))
        .await;
    assert!(first.success, "{:?}", first.error);
    services.auth.logout().await;
    let second = services
        .auth
        .login(&Credentials::new("admin", "admin123456"))
        .await;
    assert!(second.success, "{:?}", second.error);

    let reloaded = TokenStore::new(Arc::new(FileStore::new(path)));
    assert_eq!(
        reloaded.access_token().as_deref(),
        Some("mock_access_token_admin")
    );
}

#[tokio::test]
async fn mock_session_reaches_dashboard() {
    let (services, _store) = build("http://127.0.0.1:9", false, true);
    assert!(!services.auth.is_authenticated().await);

    let login = services
        .auth
        .login(&Credentials::new("admin", "admin123456"))
        .await;
    assert!(login.success);
    assert!(services.auth.is_authenticated().await);

    let response = services
        .data
        .dashboard_stats(LocaleFilter::default())
        .await
        .expect("envelope");
    assert!(response.success);
    let value = serde_json::to_value(&response).expect("serialize");
    assert!(value["data"]["stats"]["total_messages"].is_u64());

    services.auth.logout().await;
    assert!(services.tokens.access_token().is_none());
    assert_eq!(services.auth.session_state(), SessionState::LoggedOut);
}

#[tokio::test]
async fn remote_and_mock_envelopes_share_shape() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/goals/1/")
        .with_status(200)
        .with_body(goal_body(1, 40).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/v1/goals/999/")
        .with_status(404)
        .with_body(json!({"detail": "Not found."}).to_string())
        .create_async()
        .await;

    let (services, _store) = build(&server.url(), true, true);
    let remote_found = serde_json::to_value(services.data.goal(1).await.expect("remote"))
        .expect("serialize");
    let remote_missing = serde_json::to_value(services.data.goal(999).await.expect("remote"))
        .expect("serialize");

    services.preferences.set_use_api(false);
    let mock_found = serde_json::to_value(services.data.goal(1).await.expect("mock"))
        .expect("serialize");
    let mock_missing = serde_json::to_value(services.data.goal(999).await.expect("mock"))
        .expect("serialize");

    assert_eq!(top_level_keys(&remote_found), top_level_keys(&mock_found));
    assert_eq!(top_level_keys(&remote_missing), top_level_keys(&mock_missing));
    assert_eq!(remote_found["success"], json!(true));
    assert_eq!(mock_missing["success"], json!(false));
    assert_eq!(remote_missing["error"], json!("Not found."));
    assert_eq!(mock_missing["error"], json!("Goal not found"));
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/goals/1/")
        .with_status(200)
        .with_body(json!({"unexpected": true}).to_string())
        .create_async()
        .await;

    let (services, _store) = build(&server.url(), true, true);
    let result = services.data.goal(1).await;
    assert!(matches!(result, Err(ClientError::Decode { .. })));
}

#[tokio::test]
async fn mutations_carry_language_and_filters_reach_query() {
    let mut server = Server::new_async().await;
    let mark_read = server
        .mock("POST", "/v1/messages/4/mark_read/")
        .match_header("accept-language", "ar")
        .match_body(Matcher::Json(json!({"language": "ar"})))
        .with_status(200)
        .with_body(
            json!({
                "id": 4,
                "title": "الامتنان",
                "content": "...",
                "message_type": "daily",
                "language": "ar",
                "is_read": true,
                "created_at": "2024-03-04T08:00:00Z"
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let list = server
        .mock("GET", "/v1/messages/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("search".into(), "keep going".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(json!({"count": 0, "next": null, "previous": null, "results": []}).to_string())
        .expect(1)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/v1/goals/3/")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let (services, _store) = build(&server.url(), true, true);
    services.preferences.set_language(Language::Ar);

    let read = services.data.mark_message_read(4).await.expect("envelope");
    assert_eq!(read.data.map(|message| message.is_read), Some(true));

    let page = services
        .data
        .messages(MessageFilters {
            search: Some("keep going".to_string()),
            page: Some(2),
            ..MessageFilters::default()
        })
        .await
        .expect("envelope");
    assert_eq!(page.data.map(|page| page.count), Some(0));

    let deleted = services.data.delete_goal(3).await.expect("envelope");
    assert!(deleted.success);

    mark_read.assert_async().await;
    list.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn remote_login_stores_tokens_and_user() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/auth/token/")
        .match_body(Matcher::Json(
            json!({"username": "noor", "password": "s3cret-pass"}),
        ))
        .with_status(200)
        .with_body(
            json!({
                "access": "a-1",
                "refresh": "r-1",
                "user": {
                    "id": 42,
                    "username": "noor",
                    "email": "noor@example.com",
                    "date_joined": "2024-01-01T00:00:00Z"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let (services, store) = build(&server.url(), true, false);
    let response = services
        .auth
        .login(&Credentials::new("noor", "s3cret-pass"))
        .await;

    assert!(response.success);
    assert_eq!(
        store.get(storage_keys::ACCESS_TOKEN).expect("get").as_deref(),
        Some("a-1")
    );
    assert_eq!(services.auth.current_user().map(|user| user.id), Some(42));
    assert_eq!(services.auth.session_state(), SessionState::LoggedIn);
}

#[tokio::test]
async fn remote_login_rejection_leaves_storage_alone() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/auth/token/")
        .with_status(401)
        .with_body(
            json!({"detail": "No active account found with the given credentials"}).to_string(),
        )
        .create_async()
        .await;

    let (services, store) = build(&server.url(), true, false);
    let response = services
        .auth
        .login(&Credentials::new("noor", "wrong"))
        .await;

    assert_eq!(response.error.as_deref(), Some(messages::INVALID_CREDENTIALS));
    assert!(store.is_empty());
    assert_eq!(services.auth.session_state(), SessionState::LoggedOut);
}

#[tokio::test]
async fn remote_register_caches_user() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/auth/register/")
        .match_body(Matcher::PartialJson(json!({"username": "amal"})))
        .with_status(201)
        .with_body(
            json!({
                "user": {
                    "id": 9,
                    "username": "amal",
                    "email": "amal@example.com",
                    "date_joined": "2024-05-01T00:00:00Z"
                },
                "message": "User registered successfully"
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("POST", "/v1/auth/register/")
        .match_body(Matcher::PartialJson(json!({"username": "taken"})))
        .with_status(400)
        .with_body(json!({"username": ["A user with that username already exists."]}).to_string())
        .create_async()
        .await;

    let (services, _store) = build(&server.url(), true, false);
    let request = RegisterRequest {
        username: "amal".to_string(),
        email: "amal@example.com".to_string(),
        password: "long-enough".to_string(),
        password_confirm: "long-enough".to_string(),
        ..RegisterRequest::default()
    };
    let created = services.auth.register(&request).await;
    assert_eq!(created.data.map(|user| user.id), Some(9));
    assert_eq!(services.auth.current_user().map(|user| user.id), Some(9));

    let taken = services
        .auth
        .register(&RegisterRequest {
            username: "taken".to_string(),
            ..request
        })
        .await;
    assert_eq!(
        taken.error.as_deref(),
        Some("username: A user with that username already exists.")
    );
}

#[tokio::test]
async fn rejected_verify_signs_out_but_network_error_does_not() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/auth/token/verify/")
        .with_status(401)
        .create_async()
        .await;

    let (services, _store) = build_signed_in(&server.url(), "a-1", "r-1");
    assert!(!services.auth.is_authenticated().await);
    assert!(services.tokens.access_token().is_none());
    assert_eq!(services.auth.session_state(), SessionState::LoggedOut);

    let (offline, _store) = build_signed_in("http://127.0.0.1:9", "a-1", "r-1");
    assert!(!offline.auth.is_authenticated().await);
    assert_eq!(offline.tokens.access_token().as_deref(), Some("a-1"));
}

#[tokio::test]
async fn logout_clears_tokens_even_when_server_fails() {
    let mut server = Server::new_async().await;
    let logout = server
        .mock("POST", "/v1/auth/logout/")
        .match_header("authorization", "Bearer a-1")
        .match_body(Matcher::Json(json!({"refresh": "r-1"})))
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let (services, store) = build_signed_in(&server.url(), "a-1", "r-1");
    services.auth.logout().await;

    logout.assert_async().await;
    assert!(services.tokens.tokens().is_none());
    assert!(store.is_empty());
    assert_eq!(services.auth.session_state(), SessionState::LoggedOut);
}

#[tokio::test]
async fn dispose_reloads_session_from_storage() {
    let (services, store) = build("http://127.0.0.1:9", false, true);
    services
        .auth
        .login(&Credentials::new("admin", "admin123456"))
        .await;
    services.dispose();
    store
        .set(storage_keys::ACCESS_TOKEN, "replaced")
        .expect("set");
    assert_eq!(services.tokens.access_token().as_deref(), Some("replaced"));
}
