// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request-scoped context.
//!
//! Every handler receives a [`RequestContext`] and passes it along to the
//! steps it performs. The context carries the request id (set by the
//! `x-request-id` layer) and the deadline by which the request must finish;
//! handlers call [`RequestContext::ensure_active`] before touching storage.

use std::convert::Infallible;
use std::time::{Duration, Instant};

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{config::MAX_REQUEST_TIMEOUT, error::ApiError, state::AppState};

/// Header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    deadline: Instant,
}

impl RequestContext {
    /// A timeout too large to represent is clamped to [`MAX_REQUEST_TIMEOUT`].
    pub fn new(request_id: impl Into<String>, timeout: Duration) -> Self {
        let now = Instant::now();
        let deadline = now
            .checked_add(timeout)
            .unwrap_or_else(|| now + MAX_REQUEST_TIMEOUT);
        Self {
            request_id: request_id.into(),
            deadline,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Fail if the deadline has passed.
    pub fn ensure_active(&self) -> Result<(), ApiError> {
        if Instant::now() >= self.deadline {
            return Err(ApiError::internal(format!(
                "request {} exceeded its deadline",
                self.request_id
            )));
        }
        Ok(())
    }
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        Ok(RequestContext::new(request_id, state.request_timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    #[test]
    fn active_until_deadline() {
        let ctx = RequestContext::new("req-1", Duration::from_secs(30));
        assert!(ctx.ensure_active().is_ok());
    }

    #[test]
    fn expired_deadline_is_an_internal_error() {
        let ctx = RequestContext::new("req-2", Duration::ZERO);
        let err = ctx.ensure_active().unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unrepresentable_timeout_is_clamped() {
        let ctx = RequestContext::new("req-3", Duration::MAX);
        assert!(ctx.ensure_active().is_ok());
        assert!(ctx.deadline <= Instant::now() + MAX_REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn extractor_uses_request_id_header() {
        let (state, _dir) = crate::test_support::test_state();
        let mut parts = Request::builder()
            .uri("/v1/votes")
            .header(REQUEST_ID_HEADER, "abc-123")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let ctx = RequestContext::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(ctx.request_id(), "abc-123");
    }

    #[tokio::test]
    async fn extractor_generates_missing_request_id() {
        let (state, _dir) = crate::test_support::test_state();
        let mut parts = Request::builder()
            .uri("/v1/votes")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let ctx = RequestContext::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert!(!ctx.request_id().is_empty());
    }
}
