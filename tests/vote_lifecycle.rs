// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! End-to-end vote lifecycle through the HTTP router.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use votes_server::{
    api::router,
    auth::{BcryptCredentials, JwtTokenService},
    state::AppState,
    storage::VoteDatabase,
};

struct TestApp {
    app: Router,
    _dir: TempDir,
}

impl TestApp {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let db = VoteDatabase::open_in(dir.path()).expect("open database");
        let tokens = JwtTokenService::new(b"integration-secret", Duration::from_secs(3600));
        let credentials = BcryptCredentials::new(4).expect("bcrypt");
        let state = AppState::new(Arc::new(db), Arc::new(tokens), Arc::new(credentials));
        Self {
            app: router(state),
            _dir: dir,
        }
    }

    async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Register and log in; returns (user id, token).
    async fn user(&self, email: &str) -> (u64, String) {
        let (status, user) = self
            .send(
                Method::POST,
                "/v1/users",
                None,
                Some(json!({"email": email, "password": "password", "display_name": "Tester"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{user}");

        let (status, body) = self
            .send(
                Method::POST,
                "/v1/login",
                None,
                Some(json!({"email": email, "password": "password"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");

        (
            user["id"].as_u64().unwrap(),
            body["token"].as_str().unwrap().to_string(),
        )
    }

    async fn create(&self, token: &str, title: &str, author_id: u64) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/v1/votes",
            Some(token),
            Some(json!({"title": title, "description": "Description", "author_id": author_id})),
        )
        .await
    }
}

#[tokio::test]
async fn only_the_author_can_delete() {
    let app = TestApp::new();
    let (u1, t1) = app.user("u1@example.com").await;
    let (_u2, t2) = app.user("u2@example.com").await;

    let (status, vote) = app.create(&t1, "Favourite colour", u1).await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/v1/votes/{}", vote["id"]);

    let (status, body) = app.send(Method::DELETE, &uri, Some(&t2), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Unauthorized"}));

    let (status, fetched) = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, vote);

    let (status, _) = app.send(Method::DELETE, &uri, Some(&t1), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_title_is_a_conflict() {
    let app = TestApp::new();
    let (u1, t1) = app.user("u1@example.com").await;
    let (u2, t2) = app.user("u2@example.com").await;

    let (status, first) = app.create(&t1, "Same title", u1).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.create(&t2, "Same title", u2).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({"error": "Title Already Taken"}));

    let (_, all) = app.send(Method::GET, "/v1/votes", None, None).await;
    assert_eq!(all, json!([first]));
}

#[tokio::test]
async fn update_round_trip_and_field_name() {
    let app = TestApp::new();
    let (u1, t1) = app.user("u1@example.com").await;
    let (_, vote) = app.create(&t1, "Draft", u1).await;
    let uri = format!("/v1/votes/{}", vote["id"]);

    let (status, updated) = app
        .send(
            Method::PUT,
            &uri,
            Some(&t1),
            Some(json!({"title": "Final", "description": "Settled", "author_id": u1})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Final");
    assert_eq!(updated["description"], "Settled");
    assert_eq!(updated["author_id"], u1);

    let (_, fetched) = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn unauthenticated_mutations_change_nothing() {
    let app = TestApp::new();
    let (u1, t1) = app.user("u1@example.com").await;
    let (_, vote) = app.create(&t1, "Keep me", u1).await;
    let uri = format!("/v1/votes/{}", vote["id"]);

    let (status, _) = app
        .send(Method::PUT, &uri, None, Some(json!({"title": "x", "description": "y", "author_id": u1})))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send(Method::DELETE, &uri, Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, fetched) = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(fetched, vote);
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let app = TestApp::new();
    let (u1, t1) = app.user("u1@example.com").await;
    let (u2, _) = app.user("u2@example.com").await;

    // Swap the user id in the payload while keeping the original signature.
    let parts: Vec<&str> = t1.split('.').collect();
    let payload: Value = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
    let mut forged = payload.clone();
    forged["user_id"] = json!(u2);
    let forged_payload = URL_SAFE_NO_PAD.encode(forged.to_string());
    let forged_token = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

    let (status, _) = app.create(&forged_token, "Forged", u2).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(payload["user_id"], u1);
}

#[tokio::test]
async fn bad_inputs_map_to_expected_statuses() {
    let app = TestApp::new();
    let (u1, t1) = app.user("u1@example.com").await;

    let (status, _) = app.send(Method::GET, "/v1/votes/abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.create(&t1, "   ", u1).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({"error": "Required Title"}));

    let (status, _) = app
        .send(Method::POST, "/v1/votes", Some(&t1), Some(json!("not an object")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(
            Method::POST,
            "/v1/login",
            None,
            Some(json!({"email": "u1@example.com", "password": "wrong"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({"error": "Incorrect Details"}));
}

#[tokio::test]
async fn current_user_hides_password_hash() {
    let app = TestApp::new();
    let (u1, t1) = app.user("me@example.com").await;

    let (status, me) = app.send(Method::GET, "/v1/users/me", Some(&t1), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], u1);
    assert_eq!(me["access_level"], "member");
    assert!(me.get("password_hash").is_none());
}
