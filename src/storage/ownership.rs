// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership enforcement for vote mutations.
//!
//! Only the author of a vote may change or remove it. The check is always
//! made against the persisted record, never against the request body.

use crate::{
    auth::{AuthError, AuthenticatedUser},
    models::Vote,
};

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// Id of the owning user.
    fn owner_id(&self) -> u64;
}

/// Trait for enforcing ownership before a mutation.
pub trait OwnershipEnforcer {
    /// # Errors
    /// Returns `AuthError::NotOwner` if the user doesn't own the resource.
    fn verify_ownership(&self, user: &AuthenticatedUser) -> Result<(), AuthError>;
}

impl<T: OwnedResource> OwnershipEnforcer for T {
    fn verify_ownership(&self, user: &AuthenticatedUser) -> Result<(), AuthError> {
        authorize_ownership(user.user_id, self.owner_id())
    }
}

impl OwnedResource for Vote {
    fn owner_id(&self) -> u64 {
        self.author_id
    }
}

/// Fail with `NotOwner` unless `acting` is `owner_id`.
pub fn authorize_ownership(acting: u64, owner_id: u64) -> Result<(), AuthError> {
    if acting == owner_id {
        Ok(())
    } else {
        tracing::debug!(acting, owner_id, "Ownership check failed");
        Err(AuthError::NotOwner)
    }
}
