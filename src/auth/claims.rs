// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and authenticated user representation.

use serde::{Deserialize, Serialize};

/// Claims embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Always `true` for tokens issued by this service.
    pub authorized: bool,
    /// The user this token acts as.
    pub user_id: u64,
    /// Issued at (Unix seconds).
    pub iat: i64,
    /// Expiration (Unix seconds).
    pub exp: i64,
}

/// Authenticated user information extracted from a verified token.
///
/// This is the value threaded through a single request as the acting
/// identity. It is never stored outside the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Identifier of the acting user
    pub user_id: u64,
    /// Token issue time (Unix seconds)
    pub issued_at: i64,
    /// Token expiration (Unix seconds)
    pub expires_at: i64,
}

impl AuthenticatedUser {
    /// Create from verified claims.
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}
