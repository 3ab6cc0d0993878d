//! Backend client tests against a mock HTTP server.
//!
//! Covers the auth endpoints and the row-storage helpers (conversations,
//! messages, subscriptions) including header and query contracts.

use mockito::{Matcher, Server};
use pitchcoach::backend::BackendClient;
use pitchcoach::backend::types::{MessageRole, Plan};
use pitchcoach::config::{BackendConfig, NetworkConfig};
use pitchcoach::error::CoachError;
use pretty_assertions::assert_eq;

fn ensure_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

fn backend_config(url: String) -> BackendConfig {
    BackendConfig {
        url: Some(url),
        anon_key: Some("anon-key".to_string()),
    }
}

fn client_for(server: &Server) -> BackendClient {
    BackendClient::new(&backend_config(server.url()), &NetworkConfig::default()).unwrap()
}

// ========== Auth ==========

#[tokio::test]
async fn test_sign_in_builds_session_and_sets_token() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;

    let token_mock = server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::UrlEncoded(
            "grant_type".into(),
            "password".into(),
        ))
        .match_header("apikey", "anon-key")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "email": "ana@example.com",
            "password": "secret",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "access_token": "jwt-abc",
                "refresh_token": "refresh-xyz",
                "expires_in": 3600,
                "user": { "id": "user-1", "email": "ana@example.com" }
            }"#,
        )
        .create_async()
        .await;

    // Sign-in ensures a default subscription; return an existing one.
    let sub_mock = server
        .mock("GET", "/rest/v1/subscriptions")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("select".into(), "*".into()),
            Matcher::UrlEncoded("user_id".into(), "eq.user-1".into()),
        ]))
        .match_header("authorization", "Bearer jwt-abc")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id":"sub-1","user_id":"user-1","plan":"basic","status":"active",
                 "created_at":null,"updated_at":null}]"#,
        )
        .create_async()
        .await;

    let mut client = client_for(&server);
    let session = client.sign_in("ana@example.com", "secret").await.unwrap();

    assert_eq!(session.access_token, "jwt-abc");
    assert_eq!(session.refresh_token.as_deref(), Some("refresh-xyz"));
    assert_eq!(session.user_id, "user-1");
    assert_eq!(session.email.as_deref(), Some("ana@example.com"));
    assert!(session.expires_at.is_some());
    assert!(!session.is_expired());

    token_mock.assert_async().await;
    sub_mock.assert_async().await;
}

#[tokio::test]
async fn test_sign_in_bad_credentials_is_backend_error() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"error":"invalid_grant"}"#)
        .create_async()
        .await;

    let mut client = client_for(&server);
    let err = client.sign_in("ana@example.com", "wrong").await.unwrap_err();
    assert!(matches!(err, CoachError::Backend { status: 400, .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_sign_up_with_inline_user_response() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/v1/signup")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "email": "bob@example.com",
            "data": { "full_name": "Bob Martin" },
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"user-2","email":"bob@example.com"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let user = client
        .sign_up("bob@example.com", "secret", "Bob Martin")
        .await
        .unwrap();
    assert_eq!(user.id, "user-2");
    assert_eq!(user.email.as_deref(), Some("bob@example.com"));
    mock.assert_async().await;
}

// ========== Conversations ==========

#[tokio::test]
async fn test_list_conversations_newest_first_query() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/v1/conversations")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("select".into(), "*".into()),
            Matcher::UrlEncoded("user_id".into(), "eq.user-1".into()),
            Matcher::UrlEncoded("order".into(), "created_at.desc".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
              {"id":"c2","user_id":"user-1","title":"Session 2",
               "created_at":"2026-08-20T10:00:00Z","updated_at":null},
              {"id":"c1","user_id":"user-1","title":"Session 1",
               "created_at":"2026-08-19T10:00:00Z","updated_at":null}
            ]"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let conversations = client.list_conversations("user-1").await.unwrap();
    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[0].id, "c2");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_conversation_generates_sequential_title() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;

    let count_mock = server
        .mock("GET", "/rest/v1/conversations")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("select".into(), "id".into()),
            Matcher::UrlEncoded("user_id".into(), "eq.user-1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":"c1"},{"id":"c2"}]"#)
        .create_async()
        .await;

    // Two existing conversations, so the new one is number 3
    let insert_mock = server
        .mock("POST", "/rest/v1/conversations")
        .match_header("prefer", "return=representation")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "user_id": "user-1",
            "title": "Session 3",
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id":"c3","user_id":"user-1","title":"Session 3",
                "created_at":"2026-08-21T08:00:00Z","updated_at":null}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let conversation = client.create_conversation("user-1", None).await.unwrap();
    assert_eq!(conversation.title, "Session 3");
    count_mock.assert_async().await;
    insert_mock.assert_async().await;
}

#[tokio::test]
async fn test_rename_conversation_patches_title() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", "/rest/v1/conversations")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("id".into(), "eq.c1".into()),
            Matcher::UrlEncoded("user_id".into(), "eq.user-1".into()),
        ]))
        .match_body(Matcher::PartialJson(serde_json::json!({
            "title": "Salary talk",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id":"c1","user_id":"user-1","title":"Salary talk",
                "created_at":"2026-08-19T10:00:00Z","updated_at":"2026-08-21T08:00:00Z"}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let conversation = client
        .rename_conversation("c1", "user-1", "Salary talk")
        .await
        .unwrap();
    assert_eq!(conversation.title, "Salary talk");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_conversation_scopes_to_user() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/rest/v1/conversations")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("id".into(), "eq.c1".into()),
            Matcher::UrlEncoded("user_id".into(), "eq.user-1".into()),
        ]))
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server);
    client.delete_conversation("c1", "user-1").await.unwrap();
    mock.assert_async().await;
}

// ========== Messages ==========

#[tokio::test]
async fn test_add_and_list_messages() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;

    let insert_mock = server
        .mock("POST", "/rest/v1/messages")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "conversation_id": "c1",
            "role": "user",
            "content": "How do I anchor high?",
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id":"m1","conversation_id":"c1","role":"user",
                "content":"How do I anchor high?","created_at":"2026-08-21T08:00:00Z"}"#,
        )
        .create_async()
        .await;

    let list_mock = server
        .mock("GET", "/rest/v1/messages")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("conversation_id".into(), "eq.c1".into()),
            Matcher::UrlEncoded("order".into(), "created_at.asc".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
              {"id":"m1","conversation_id":"c1","role":"user",
               "content":"How do I anchor high?","created_at":"2026-08-21T08:00:00Z"},
              {"id":"m2","conversation_id":"c1","role":"assistant",
               "content":"Start above your target.","created_at":"2026-08-21T08:00:05Z"}
            ]"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let stored = client
        .add_message("c1", MessageRole::User, "How do I anchor high?")
        .await
        .unwrap();
    assert_eq!(stored.role, MessageRole::User);

    let messages = client.list_messages("c1").await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role, MessageRole::Assistant);

    insert_mock.assert_async().await;
    list_mock.assert_async().await;
}

// ========== Subscriptions ==========

#[tokio::test]
async fn test_ensure_subscription_creates_when_missing() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;

    let get_mock = server
        .mock("GET", "/rest/v1/subscriptions")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let insert_mock = server
        .mock("POST", "/rest/v1/subscriptions")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "user_id": "user-1",
            "plan": "basic",
            "status": "active",
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id":"sub-1","user_id":"user-1","plan":"basic","status":"active",
                "created_at":null,"updated_at":null}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let subscription = client
        .ensure_subscription("user-1", Plan::Basic)
        .await
        .unwrap();
    assert_eq!(subscription.plan, Plan::Basic);
    get_mock.assert_async().await;
    insert_mock.assert_async().await;
}

#[tokio::test]
async fn test_change_plan_upgrades_to_premium() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", "/rest/v1/subscriptions")
        .match_query(Matcher::UrlEncoded("user_id".into(), "eq.user-1".into()))
        .match_body(Matcher::PartialJson(serde_json::json!({ "plan": "premium" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id":"sub-1","user_id":"user-1","plan":"premium","status":"active",
                "created_at":null,"updated_at":"2026-08-21T08:00:00Z"}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let subscription = client.change_plan("user-1", Plan::Premium).await.unwrap();
    assert_eq!(subscription.plan, Plan::Premium);
    mock.assert_async().await;
}
