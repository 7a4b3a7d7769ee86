// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
};

use super::{AuthError, AuthenticatedUser, TokenVerifier};
use crate::state::AppState;

/// Compared case-insensitively.
const BEARER_SCHEME: &str = "Bearer";

/// Resolve the acting user from an `Authorization` header value.
///
/// Missing header, a non-bearer scheme, an empty token and any token
/// verification failure all reject the request.
pub fn authenticate<V>(header: Option<&HeaderValue>, verifier: &V) -> Result<AuthenticatedUser, AuthError>
where
    V: TokenVerifier + ?Sized,
{
    let header = header
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let (scheme, token) = header
        .split_once(' ')
        .ok_or(AuthError::InvalidAuthHeader)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) || token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }

    Ok(verifier.verify(token)?)
}

/// Extractor for authenticated users.
///
/// # Example
///
/// ```rust,ignore
/// async fn delete_vote(
///     Auth(user): Auth,
///     State(state): State<AppState>,
/// ) -> Result<StatusCode, ApiError> {
///     // user.user_id is the acting identity for this request only
/// }
/// ```
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = authenticate(parts.headers.get(AUTHORIZATION), state.tokens.as_ref())?;
        Ok(Auth(user))
    }
}
