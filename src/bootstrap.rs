// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Startup wiring: open storage, build capabilities, seed the administrator.

use std::sync::Arc;

use crate::{
    auth::{BcryptCredentials, CredentialError, CredentialVerifier, JwtTokenService},
    config::{Config, SeedAdmin},
    models::AccessLevel,
    state::AppState,
    storage::{Constraint, NewUser, StorageError, UserStore, VoteDatabase},
};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
    #[error("credentials: {0}")]
    Credential(#[from] CredentialError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Created(u64),
    AlreadyPresent(u64),
}

/// Build the application state described by `config`.
pub fn build_state(config: &Config) -> Result<AppState, BootstrapError> {
    let db = Arc::new(VoteDatabase::open_in(&config.data_dir)?);
    let tokens = JwtTokenService::new(config.token_secret.as_bytes(), config.token_ttl);
    let credentials = BcryptCredentials::new(config.bcrypt_cost)?;

    tracing::info!(
        data_dir = %config.data_dir.display(),
        token_ttl_secs = tokens.validity().as_secs(),
        bcrypt_cost = config.bcrypt_cost,
        "Storage opened"
    );

    let state = AppState::new(db, Arc::new(tokens), Arc::new(credentials))
        .with_request_timeout(config.request_timeout);

    if let Some(admin) = &config.seed_admin {
        seed_admin(state.users.as_ref(), state.credentials.as_ref(), admin)?;
    }

    Ok(state)
}

/// Ensure an administrator with the given email exists.
///
/// An existing account with that email is left untouched.
pub fn seed_admin(
    users: &dyn UserStore,
    credentials: &dyn CredentialVerifier,
    admin: &SeedAdmin,
) -> Result<SeedOutcome, BootstrapError> {
    if let Some(existing) = users.find_user_by_email(&admin.email)? {
        tracing::info!(user_id = existing.id, "Seed administrator already present");
        return Ok(SeedOutcome::AlreadyPresent(existing.id));
    }

    let password_hash = credentials.hash(&admin.password)?;
    let inserted = users.insert_user(&NewUser {
        email: admin.email.clone(),
        password_hash,
        display_name: "Administrator".to_string(),
        access_level: AccessLevel::Administrator,
    });

    match inserted {
        Ok(user) => {
            tracing::info!(user_id = user.id, "Seed administrator created");
            Ok(SeedOutcome::Created(user.id))
        }
        // Lost a race with another writer; the account exists either way.
        Err(e) if e.constraint() == Some(Constraint::UniqueUserEmail) => {
            let existing = users
                .find_user_by_email(&admin.email)?
                .ok_or_else(|| StorageError::NotFound(format!("User {}", admin.email)))?;
            Ok(SeedOutcome::AlreadyPresent(existing.id))
        }
        Err(e) => Err(e.into()),
    }
}
