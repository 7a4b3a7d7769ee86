// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared fixtures for unit tests.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use crate::{
    auth::{BcryptCredentials, JwtTokenService, TokenIssuer},
    models::AccessLevel,
    state::AppState,
    storage::{NewUser, StoredUser, VoteDatabase},
};

pub(crate) const TEST_SECRET: &[u8] = b"unit-test-secret";
pub(crate) const TEST_PASSWORD: &str = "password";

/// Fresh state over an empty database in a temp dir.
///
/// Keep the returned `TempDir` alive for as long as the state is used.
pub(crate) fn test_state() -> (AppState, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db = VoteDatabase::open_in(temp_dir.path()).expect("Failed to open database");
    let tokens = JwtTokenService::new(TEST_SECRET, Duration::from_secs(3600));
    let credentials = BcryptCredentials::new(4).expect("bcrypt at minimum cost");

    let state = AppState::new(Arc::new(db), Arc::new(tokens), Arc::new(credentials));
    (state, temp_dir)
}

/// Insert a member with [`TEST_PASSWORD`].
pub(crate) fn seed_user(state: &AppState, email: &str) -> StoredUser {
    let password_hash = state.credentials.hash(TEST_PASSWORD).unwrap();
    state
        .users
        .insert_user(&NewUser {
            email: email.to_string(),
            password_hash,
            display_name: email.split('@').next().unwrap_or(email).to_string(),
            access_level: AccessLevel::Member,
        })
        .unwrap()
}

/// `Authorization` header value for `user_id`.
pub(crate) fn bearer(state: &AppState, user_id: u64) -> String {
    format!("Bearer {}", state.tokens.issue(user_id).unwrap())
}
