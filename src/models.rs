// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the request and response data structures used by
//! the REST API. All types derive `Serialize`, `Deserialize`, and `ToSchema`
//! for automatic JSON handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Votes**: the owned resource (`description` is used in both directions)
//! - **Users**: public user view and registration request
//! - **Login**: credentials in, bearer token out

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Vote Models
// =============================================================================

/// A vote record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Vote {
    /// System-assigned identifier.
    pub id: u64,
    /// Title, unique across all votes.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Identifier of the user who owns this vote.
    pub author_id: u64,
    /// When the vote was created.
    pub created_at: DateTime<Utc>,
    /// When the vote was last replaced.
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or replacing a vote.
///
/// Missing fields deserialize to their empty value so that the validation
/// pipeline, not the JSON parser, reports which field is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct VoteRequest {
    /// Vote title (trimmed before validation).
    #[serde(default)]
    pub title: String,
    /// Vote description (trimmed before validation).
    #[serde(default)]
    pub description: String,
    /// Author of the vote; must equal the authenticated user.
    #[serde(default)]
    pub author_id: u64,
}

// =============================================================================
// User Models
// =============================================================================

/// Access level tag carried by every user.
///
/// Stored and reported, but ownership checks never consult it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    #[default]
    Member,
    Administrator,
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessLevel::Member => write!(f, "member"),
            AccessLevel::Administrator => write!(f, "administrator"),
        }
    }
}

/// Public view of a user (never includes the password hash).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub display_name: String,
    pub access_level: AccessLevel,
    pub created_at: DateTime<Utc>,
}

/// Request to register a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub display_name: String,
}

// =============================================================================
// Login Models
// =============================================================================

/// Login credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Bearer token to send as `Authorization: Bearer <token>`.
    pub token: String,
}
