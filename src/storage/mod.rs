// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistent storage for users and votes, backed by a single embedded
//! [redb](https://docs.rs/redb) database file (`votes.redb`) under the
//! configured data directory.
//!
//! ## Layout
//!
//! ```text
//! $DATA_DIR/
//!   votes.redb    # users, votes, uniqueness indexes, id sequences
//! ```
//!
//! Handlers only see the [`UserStore`] and [`VoteStore`] traits; the
//! concrete [`VoteDatabase`] is wired in at startup. Constraint checks
//! (unique vote title, unique email, existing author) happen inside the
//! write transaction and surface as [`StorageError::ConstraintViolation`].

pub mod database;
pub mod error;
pub mod ownership;
pub mod records;

pub use database::{VoteDatabase, DATABASE_FILE};
pub use error::{Constraint, StorageError, StorageResult};
pub use ownership::{authorize_ownership, OwnedResource, OwnershipEnforcer};
pub use records::{NewUser, NewVote, StoredUser};

use crate::models::Vote;

/// User accounts.
pub trait UserStore: Send + Sync {
    /// Insert a new user. Fails with `UniqueUserEmail` if the email is taken.
    fn insert_user(&self, user: &NewUser) -> StorageResult<StoredUser>;

    /// Look up a user by email (case-insensitive).
    fn find_user_by_email(&self, email: &str) -> StorageResult<Option<StoredUser>>;

    fn get_user(&self, id: u64) -> StorageResult<Option<StoredUser>>;
}

/// Vote records.
pub trait VoteStore: Send + Sync {
    /// All votes in ascending id order.
    fn list_votes(&self) -> StorageResult<Vec<Vote>>;

    fn get_vote(&self, id: u64) -> StorageResult<Option<Vote>>;

    /// Insert a vote, assigning its id and timestamps.
    fn insert_vote(&self, vote: &NewVote) -> StorageResult<Vote>;

    /// Replace every mutable field of an existing vote.
    ///
    /// On any error the stored record is left unchanged.
    fn replace_vote(&self, id: u64, vote: &NewVote) -> StorageResult<Vote>;

    /// Remove a vote. Fails with `NotFound` if it does not exist.
    fn delete_vote(&self, id: u64) -> StorageResult<()>;

    /// Cheap read used by the readiness probe.
    fn health_check(&self) -> StorageResult<()>;
}
