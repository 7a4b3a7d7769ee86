// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Storage error types.
//!
//! Constraint violations are reported as a tagged variant naming the
//! violated constraint, so callers can tell a duplicate title apart from an
//! I/O fault without inspecting message text.

use std::fmt;

/// Constraints enforced inside the write transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Vote titles are unique across all votes.
    UniqueVoteTitle,
    /// User emails are unique (case-insensitive).
    UniqueUserEmail,
    /// A vote's author must reference an existing user.
    VoteAuthorExists,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::UniqueVoteTitle => write!(f, "votes.title unique"),
            Constraint::UniqueUserEmail => write!(f, "users.email unique"),
            Constraint::VoteAuthorExists => write!(f, "votes.author_id references users.id"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("constraint violated: {constraint}")]
    ConstraintViolation { constraint: Constraint },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn violation(constraint: Constraint) -> Self {
        StorageError::ConstraintViolation { constraint }
    }

    /// The violated constraint, if this is a constraint violation.
    pub fn constraint(&self) -> Option<Constraint> {
        match self {
            StorageError::ConstraintViolation { constraint } => Some(*constraint),
            _ => None,
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_is_exposed_only_for_violations() {
        let err = StorageError::violation(Constraint::UniqueVoteTitle);
        assert_eq!(err.constraint(), Some(Constraint::UniqueVoteTitle));

        let err = StorageError::NotFound("Vote 3".to_string());
        assert_eq!(err.constraint(), None);
    }
}
