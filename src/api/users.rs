// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::Auth,
    context::RequestContext,
    error::ApiError,
    models::{AccessLevel, RegisterUserRequest, User},
    state::AppState,
    storage::NewUser,
    validation::{normalize_registration, validate_registration},
};

/// Register a new member account.
#[utoipa::path(
    post,
    path = "/v1/users",
    tag = "Users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 409, description = "Email Already Taken"),
        (status = 422, description = "Missing or invalid field")
    )
)]
pub async fn register_user(
    ctx: RequestContext,
    State(state): State<AppState>,
    body: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(request) = body.map_err(|e| ApiError::unprocessable(e.body_text()))?;
    let request = normalize_registration(request);
    validate_registration(&request)?;

    let credentials = state.credentials.clone();
    let password = request.password;
    let password_hash = tokio::task::spawn_blocking(move || credentials.hash(&password))
        .await
        .map_err(ApiError::internal)?
        .map_err(ApiError::internal)?;

    ctx.ensure_active()?;
    let stored = state.users.insert_user(&NewUser {
        email: request.email,
        password_hash,
        display_name: request.display_name,
        access_level: AccessLevel::Member,
    })?;

    tracing::info!(
        user_id = stored.id,
        request_id = %ctx.request_id(),
        "User registered"
    );

    Ok((StatusCode::CREATED, Json(stored.into())))
}

/// Get the current authenticated user's information.
///
/// Never includes the password hash.
#[utoipa::path(
    get,
    path = "/v1/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User information", body = User),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "Token names a user that no longer exists")
    )
)]
pub async fn get_current_user(
    ctx: RequestContext,
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<User>, ApiError> {
    ctx.ensure_active()?;
    let stored = state
        .users
        .get_user(user.user_id)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(stored.into()))
}
