// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Vote endpoints.
//!
//! Reads are public. Every mutation authenticates first, then checks that
//! the acting user owns the vote (for create, the submitted `author_id`;
//! for update and delete, the persisted author), then validates, then
//! commits. Each step short-circuits on failure so nothing is written.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header::LOCATION, HeaderName, StatusCode},
    Json,
};

use crate::{
    auth::Auth,
    context::RequestContext,
    error::ApiError,
    models::{Vote, VoteRequest},
    state::AppState,
    storage::{authorize_ownership, OwnershipEnforcer},
    validation::{normalize_vote, validate_vote},
};

/// Parse a path id. Anything but a positive integer is a bad request.
fn parse_vote_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::bad_request("Invalid vote id"))
}

fn vote_not_found() -> ApiError {
    ApiError::not_found("Vote not found")
}

fn fetch_vote(ctx: &RequestContext, state: &AppState, id: u64) -> Result<Vote, ApiError> {
    ctx.ensure_active()?;
    state.votes.get_vote(id)?.ok_or_else(vote_not_found)
}

/// List all votes.
#[utoipa::path(
    get,
    path = "/v1/votes",
    tag = "Votes",
    responses(
        (status = 200, description = "All votes", body = [Vote]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_votes(
    ctx: RequestContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<Vote>>, ApiError> {
    ctx.ensure_active()?;
    Ok(Json(state.votes.list_votes()?))
}

/// Get a single vote.
#[utoipa::path(
    get,
    path = "/v1/votes/{id}",
    params(("id" = u64, Path, description = "Vote identifier")),
    tag = "Votes",
    responses(
        (status = 200, description = "The vote", body = Vote),
        (status = 400, description = "Id is not a positive integer"),
        (status = 404, description = "No such vote")
    )
)]
pub async fn get_vote(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vote>, ApiError> {
    let id = parse_vote_id(&raw_id)?;
    Ok(Json(fetch_vote(&ctx, &state, id)?))
}

/// Create a vote authored by the caller.
#[utoipa::path(
    post,
    path = "/v1/votes",
    tag = "Votes",
    security(("bearer_auth" = [])),
    request_body = VoteRequest,
    responses(
        (status = 201, description = "Vote created", body = Vote),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Title Already Taken"),
        (status = 422, description = "Required field missing")
    )
)]
pub async fn create_vote(
    ctx: RequestContext,
    Auth(user): Auth,
    State(state): State<AppState>,
    body: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<Vote>), ApiError> {
    let Json(request) = body?;
    let vote = normalize_vote(request);

    // A caller may only create votes in their own name.
    authorize_ownership(user.user_id, vote.author_id)?;
    validate_vote(&vote)?;

    ctx.ensure_active()?;
    let created = state.votes.insert_vote(&vote)?;

    tracing::info!(
        vote_id = created.id,
        user_id = user.user_id,
        request_id = %ctx.request_id(),
        "Vote created"
    );

    let location = format!("/v1/votes/{}", created.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(created)))
}

/// Replace a vote owned by the caller.
#[utoipa::path(
    put,
    path = "/v1/votes/{id}",
    params(("id" = u64, Path, description = "Vote identifier")),
    tag = "Votes",
    security(("bearer_auth" = [])),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote updated", body = Vote),
        (status = 400, description = "Malformed id or body"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No such vote"),
        (status = 409, description = "Title Already Taken"),
        (status = 422, description = "Required field missing")
    )
)]
pub async fn update_vote(
    ctx: RequestContext,
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<Json<Vote>, ApiError> {
    let id = parse_vote_id(&raw_id)?;
    let existing = fetch_vote(&ctx, &state, id)?;
    existing.verify_ownership(&user)?;

    let Json(request) = body?;
    let vote = normalize_vote(request);
    validate_vote(&vote)?;
    // Authorship cannot be handed to someone else.
    authorize_ownership(user.user_id, vote.author_id)?;

    ctx.ensure_active()?;
    let updated = state.votes.replace_vote(id, &vote)?;

    tracing::info!(
        vote_id = id,
        user_id = user.user_id,
        request_id = %ctx.request_id(),
        "Vote updated"
    );

    Ok(Json(updated))
}

/// Delete a vote owned by the caller.
#[utoipa::path(
    delete,
    path = "/v1/votes/{id}",
    params(("id" = u64, Path, description = "Vote identifier")),
    tag = "Votes",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Vote deleted"),
        (status = 400, description = "Id is not a positive integer"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No such vote")
    )
)]
pub async fn delete_vote(
    ctx: RequestContext,
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_vote_id(&raw_id)?;
    let existing = fetch_vote(&ctx, &state, id)?;
    existing.verify_ownership(&user)?;

    ctx.ensure_active()?;
    state.votes.delete_vote(id)?;

    tracing::info!(
        vote_id = id,
        user_id = user.user_id,
        request_id = %ctx.request_id(),
        "Vote deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
