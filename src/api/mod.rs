// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    body::Body,
    http::Request,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    context::REQUEST_ID_HEADER,
    models::{AccessLevel, LoginRequest, RegisterUserRequest, TokenResponse, User, Vote, VoteRequest},
    state::AppState,
};

pub mod health;
pub mod login;
pub mod users;
pub mod votes;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/login", post(login::login))
        .route("/users", post(users::register_user))
        .route("/users/me", get(users::get_current_user))
        .route("/votes", get(votes::list_votes).post(votes::create_vote))
        .route(
            "/votes/{id}",
            get(votes::get_vote)
                .put(votes::update_vote)
                .delete(votes::delete_vote),
        );

    let health_routes = Router::new()
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    // Layers run bottom-up: the request id is set before the trace span opens.
    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(trace_layer)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Registers the bearer token scheme referenced by protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        login::login,
        users::register_user,
        users::get_current_user,
        votes::list_votes,
        votes::get_vote,
        votes::create_vote,
        votes::update_vote,
        votes::delete_vote,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            Vote,
            VoteRequest,
            User,
            AccessLevel,
            LoginRequest,
            RegisterUserRequest,
            TokenResponse,
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Password login"),
        (name = "Users", description = "Registration and current user"),
        (name = "Votes", description = "Vote management"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{bearer, seed_user, test_state};
    use axum::{body::to_bytes, http::StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let (state, _dir) = test_state();
        let app = router(state);
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let (state, _dir) = test_state();
        let response = router(state)
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .header(REQUEST_ID_HEADER, "req-abc-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-abc-1");
    }

    #[tokio::test]
    async fn request_id_is_generated_when_absent() {
        let (state, _dir) = test_state();
        let response = router(state)
            .oneshot(Request::builder().uri("/v1/votes").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"[]");
    }

    #[tokio::test]
    async fn unauthenticated_mutation_is_rejected() {
        let (state, _dir) = test_state();
        let response = router(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/votes")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"title":"t","description":"d","author_id":1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"error":"Unauthorized"}"#);
        assert!(state.votes.list_votes().unwrap().is_empty());
    }

    #[tokio::test]
    async fn lowercase_bearer_scheme_creates_vote() {
        let (state, _dir) = test_state();
        let author = seed_user(&state, "author@example.com");
        let authorization = bearer(&state, author.id).replacen("Bearer", "bearer", 1);

        let response = router(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/votes")
                    .header("authorization", authorization)
                    .header("content-type", "application/json")
                    .body(Body::from(format!(
                        r#"{{"title":"t","description":"d","author_id":{}}}"#,
                        author.id
                    )))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(state.votes.list_votes().unwrap().len(), 1);
    }

    #[test]
    fn openapi_lists_vote_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/v1/votes"));
        assert!(doc.paths.paths.contains_key("/v1/votes/{id}"));
        assert!(doc.paths.paths.contains_key("/v1/login"));
    }
}
