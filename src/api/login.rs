// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password login.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::{
    auth::{CredentialError, TokenIssuer},
    context::RequestContext,
    error::ApiError,
    models::{LoginRequest, TokenResponse},
    state::AppState,
    validation::{normalize_login, validate_login},
};

/// Returned for an unknown email and for a wrong password alike.
pub const INCORRECT_DETAILS_MESSAGE: &str = "Incorrect Details";

fn incorrect_details() -> ApiError {
    ApiError::unprocessable(INCORRECT_DETAILS_MESSAGE)
}

/// Exchange email and password for a bearer token.
#[utoipa::path(
    post,
    path = "/v1/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 422, description = "Missing fields or Incorrect Details")
    )
)]
pub async fn login(
    ctx: RequestContext,
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::unprocessable(e.body_text()))?;
    let request = normalize_login(request);
    validate_login(&request)?;

    ctx.ensure_active()?;
    let user = state.users.find_user_by_email(&request.email)?;

    // bcrypt blocks; run it on the blocking pool.
    let credentials = state.credentials.clone();
    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let password = request.password;
    let outcome = tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => credentials.verify(&hash, &password),
        None => {
            credentials.verify_unknown_user(&password);
            Err(CredentialError::Mismatch)
        }
    })
    .await
    .map_err(ApiError::internal)?;

    let user = match (outcome, user) {
        (Ok(()), Some(user)) => user,
        (Ok(()), None) | (Err(CredentialError::Mismatch), _) => {
            tracing::debug!(request_id = %ctx.request_id(), "Login rejected");
            return Err(incorrect_details());
        }
        (Err(e), _) => return Err(ApiError::internal(e)),
    };

    let token = state.tokens.issue(user.id).map_err(ApiError::internal)?;

    tracing::info!(
        user_id = user.id,
        access_level = %user.access_level,
        request_id = %ctx.request_id(),
        "User logged in"
    );

    Ok(Json(TokenResponse { token }))
}
