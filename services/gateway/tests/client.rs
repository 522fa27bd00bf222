//! The client-side session and chat page running over the HTTP backend adapter.

use gateway_lib::adapters::HttpBackend;
use mockito::Matcher;
use serde_json::json;
use site_builder_core::{
    navigation::HistoryNavigator, storage::MemorySessionStore, AuthSession, AuthStatus,
    ChatPageController, ChatView, SendOutcome, SessionStore,
};
use std::sync::Arc;
use url::Url;

struct Client {
    store: Arc<MemorySessionStore>,
    navigator: Arc<HistoryNavigator>,
    backend: Arc<HttpBackend>,
}

fn client(server: &mockito::Server) -> Client {
    let store = Arc::new(MemorySessionStore::new());
    let navigator = Arc::new(HistoryNavigator::new("/login"));
    let backend = Arc::new(HttpBackend::new(
        reqwest::Client::new(),
        Url::parse(&server.url()).unwrap(),
        store.clone(),
        navigator.clone(),
    ));
    Client {
        store,
        navigator,
        backend,
    }
}

#[tokio::test]
async fn sign_in_then_open_a_conversation() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/login")
        .with_status(200)
        .with_body(
            r#"{"success":true,"data":{"token":"tok-1","user":{"_id":"u1","email":"ana@example.com","username":"ana"}}}"#,
        )
        .create_async()
        .await;
    server
        .mock("GET", "/api/chat/c1")
        .match_header("authorization", "Bearer tok-1")
        .with_status(200)
        .with_body(
            json!({
                "success": true,
                "data": {
                    "_id": "c1",
                    "title": "Bakery landing page",
                    "messages": [
                        { "_id": "m1", "sender": "user", "text": "Make a hero", "timestamp": "2024-05-01T09:05:00Z" },
                        { "_id": "m2", "sender": "ai", "text": "Done", "timestamp": "2024-05-01T09:06:00Z", "messageType": "code_generation" }
                    ]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/api/preview/c1/current")
        .with_status(200)
        .with_body(r#"{"success":true,"data":{"currentCode":{"html":"<h1>Bread</h1>","css":"","js":""}}}"#)
        .create_async()
        .await;

    let c = client(&server);
    let session = AuthSession::new(c.backend.clone(), c.store.clone(), c.navigator.clone());
    session.sign_in("ana@example.com", "pw").await.unwrap();
    assert!(matches!(session.status(), AuthStatus::Authenticated(ref u) if u.id == "u1"));
    assert_eq!(c.store.cookie_token().as_deref(), Some("tok-1"));

    let mut page =
        ChatPageController::new("c1", c.backend.clone(), c.backend.clone(), c.store.clone());
    page.load().await;

    match page.view() {
        ChatView::Ready(view) => {
            assert_eq!(view.title, "Bakery landing page");
            assert_eq!(view.message_count, 2);
            assert!(view.bubbles[1].has_code);
            assert_eq!(view.code.sections, vec!["HTML"]);
        }
        other => panic!("unexpected view: {other:?}"),
    }
}

#[tokio::test]
async fn expired_token_signs_the_page_out() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/chat/c1")
        .with_status(401)
        .with_body(r#"{"success":false,"message":"Token expired"}"#)
        .create_async()
        .await;

    let c = client(&server);
    c.store.set_token("expired");

    let mut page =
        ChatPageController::new("c1", c.backend.clone(), c.backend.clone(), c.store.clone());
    page.load().await;

    assert!(matches!(page.view(), ChatView::Error { .. }));
    assert_eq!(c.store.token(), None);
    assert_eq!(c.store.cookie_token(), None);
    assert_eq!(c.navigator.current(), "/login");
}

#[tokio::test]
async fn code_generation_refreshes_conversation_code_and_preview() {
    let mut server = mockito::Server::new_async().await;
    let conversation = server
        .mock("GET", "/api/chat/c1")
        .with_status(200)
        .with_body(r#"{"success":true,"data":{"_id":"c1","title":"Shop","messages":[]}}"#)
        .expect(2)
        .create_async()
        .await;
    server
        .mock("GET", "/api/preview/c1/current")
        .with_status(200)
        .with_body(r#"{"success":true,"data":{"currentCode":{"html":"<p>v2</p>","css":"p{}","js":""}}}"#)
        .create_async()
        .await;
    let generate = server
        .mock("POST", "/api/chat/c1/generate")
        .match_body(Matcher::Json(json!({ "prompt": "add a footer" })))
        .with_status(200)
        .with_body(r#"{"success":true,"data":{}}"#)
        .create_async()
        .await;
    let preview = server
        .mock("GET", "/api/preview/c1")
        .with_status(200)
        .with_body(r#"{"success":true,"data":{"previewDocument":"<html><p>v2</p></html>"}}"#)
        .create_async()
        .await;

    let c = client(&server);
    c.store.set_token("tok");
    let mut page =
        ChatPageController::new("c1", c.backend.clone(), c.backend.clone(), c.store.clone());
    page.load().await;

    page.set_draft("add a footer");
    assert_eq!(page.send_code_generation().await, SendOutcome::Sent);
    assert_eq!(page.preview_document(), "<html><p>v2</p></html>");
    assert_eq!(page.current_code().css, "p{}");
    assert_eq!(page.draft(), "");

    conversation.assert_async().await;
    generate.assert_async().await;
    preview.assert_async().await;
}
