// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded votes database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `users`: user_id → serialized StoredUser
//! - `user_email_index`: lowercase email → user_id
//! - `votes`: vote_id → serialized Vote
//! - `vote_title_index`: title → vote_id
//! - `sequences`: sequence name → last assigned id
//!
//! Uniqueness and author references are checked inside the same write
//! transaction that performs the write. redb serializes write transactions,
//! so of two racing writes with the same title exactly one commits and the
//! other observes `ConstraintViolation`.

use std::path::Path;

use chrono::Utc;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};

use super::{
    Constraint, NewUser, NewVote, StorageError, StorageResult, StoredUser, UserStore, VoteStore,
};
use crate::models::Vote;

// =============================================================================
// Table Definitions
// =============================================================================

const USERS: TableDefinition<u64, &[u8]> = TableDefinition::new("users");

const USER_EMAIL_INDEX: TableDefinition<&str, u64> = TableDefinition::new("user_email_index");

const VOTES: TableDefinition<u64, &[u8]> = TableDefinition::new("votes");

const VOTE_TITLE_INDEX: TableDefinition<&str, u64> = TableDefinition::new("vote_title_index");

/// Sequence name → last id handed out.
const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

const USER_SEQUENCE: &str = "users";
const VOTE_SEQUENCE: &str = "votes";

/// File name of the database inside `DATA_DIR`.
pub const DATABASE_FILE: &str = "votes.redb";

/// Emails are unique regardless of case.
fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Allocate the next id of a sequence inside an open write transaction.
fn next_id(txn: &WriteTransaction, sequence: &str) -> StorageResult<u64> {
    let mut table = txn.open_table(SEQUENCES)?;
    let current = table.get(sequence)?.map(|v| v.value()).unwrap_or(0);
    let next = current + 1;
    table.insert(sequence, next)?;
    Ok(next)
}

// =============================================================================
// VoteDatabase
// =============================================================================

/// Embedded ACID database holding users and votes.
pub struct VoteDatabase {
    db: Database,
}

impl VoteDatabase {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS)?;
            let _ = write_txn.open_table(USER_EMAIL_INDEX)?;
            let _ = write_txn.open_table(VOTES)?;
            let _ = write_txn.open_table(VOTE_TITLE_INDEX)?;
            let _ = write_txn.open_table(SEQUENCES)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Open the database file inside a data directory.
    pub fn open_in(data_dir: &Path) -> StorageResult<Self> {
        Self::open(&data_dir.join(DATABASE_FILE))
    }

    fn read_vote(&self, id: u64) -> StorageResult<Option<Vote>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(VOTES)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }
}

// =============================================================================
// UserStore
// =============================================================================

impl UserStore for VoteDatabase {
    fn insert_user(&self, user: &NewUser) -> StorageResult<StoredUser> {
        let key = email_key(&user.email);

        let write_txn = self.db.begin_write()?;
        let stored = {
            let mut emails = write_txn.open_table(USER_EMAIL_INDEX)?;
            if emails.get(key.as_str())?.is_some() {
                return Err(StorageError::violation(Constraint::UniqueUserEmail));
            }

            let id = next_id(&write_txn, USER_SEQUENCE)?;
            let stored = StoredUser {
                id,
                email: user.email.trim().to_string(),
                password_hash: user.password_hash.clone(),
                display_name: user.display_name.clone(),
                access_level: user.access_level,
                created_at: Utc::now(),
            };

            emails.insert(key.as_str(), id)?;
            let mut users = write_txn.open_table(USERS)?;
            let json = serde_json::to_vec(&stored)?;
            users.insert(id, json.as_slice())?;
            stored
        };
        write_txn.commit()?;

        Ok(stored)
    }

    fn find_user_by_email(&self, email: &str) -> StorageResult<Option<StoredUser>> {
        let key = email_key(email);
        let read_txn = self.db.begin_read()?;
        let emails = read_txn.open_table(USER_EMAIL_INDEX)?;
        let Some(id) = emails.get(key.as_str())?.map(|v| v.value()) else {
            return Ok(None);
        };

        let users = read_txn.open_table(USERS)?;
        match users.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    fn get_user(&self, id: u64) -> StorageResult<Option<StoredUser>> {
        let read_txn = self.db.begin_read()?;
        let users = read_txn.open_table(USERS)?;
        match users.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }
}

// =============================================================================
// VoteStore
// =============================================================================

impl VoteStore for VoteDatabase {
    fn list_votes(&self) -> StorageResult<Vec<Vote>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(VOTES)?;

        let mut votes = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            votes.push(serde_json::from_slice(value.value())?);
        }
        Ok(votes)
    }

    fn get_vote(&self, id: u64) -> StorageResult<Option<Vote>> {
        self.read_vote(id)
    }

    fn insert_vote(&self, vote: &NewVote) -> StorageResult<Vote> {
        let write_txn = self.db.begin_write()?;
        let inserted = {
            let users = write_txn.open_table(USERS)?;
            if users.get(vote.author_id)?.is_none() {
                return Err(StorageError::violation(Constraint::VoteAuthorExists));
            }

            let mut titles = write_txn.open_table(VOTE_TITLE_INDEX)?;
            if titles.get(vote.title.as_str())?.is_some() {
                return Err(StorageError::violation(Constraint::UniqueVoteTitle));
            }

            let id = next_id(&write_txn, VOTE_SEQUENCE)?;
            let now = Utc::now();
            let inserted = Vote {
                id,
                title: vote.title.clone(),
                description: vote.description.clone(),
                author_id: vote.author_id,
                created_at: now,
                updated_at: now,
            };

            titles.insert(vote.title.as_str(), id)?;
            let mut votes = write_txn.open_table(VOTES)?;
            let json = serde_json::to_vec(&inserted)?;
            votes.insert(id, json.as_slice())?;
            inserted
        };
        write_txn.commit()?;

        Ok(inserted)
    }

    fn replace_vote(&self, id: u64, vote: &NewVote) -> StorageResult<Vote> {
        let write_txn = self.db.begin_write()?;
        let replaced = {
            let mut votes = write_txn.open_table(VOTES)?;
            let existing: Vote = match votes.get(id)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => return Err(StorageError::NotFound(format!("Vote {id}"))),
            };

            let users = write_txn.open_table(USERS)?;
            if users.get(vote.author_id)?.is_none() {
                return Err(StorageError::violation(Constraint::VoteAuthorExists));
            }

            if existing.title != vote.title {
                let mut titles = write_txn.open_table(VOTE_TITLE_INDEX)?;
                if titles.get(vote.title.as_str())?.is_some() {
                    return Err(StorageError::violation(Constraint::UniqueVoteTitle));
                }
                titles.remove(existing.title.as_str())?;
                titles.insert(vote.title.as_str(), id)?;
            }

            let replaced = Vote {
                id,
                title: vote.title.clone(),
                description: vote.description.clone(),
                author_id: vote.author_id,
                created_at: existing.created_at,
                updated_at: Utc::now(),
            };
            let json = serde_json::to_vec(&replaced)?;
            votes.insert(id, json.as_slice())?;
            replaced
        };
        write_txn.commit()?;

        Ok(replaced)
    }

    fn delete_vote(&self, id: u64) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut votes = write_txn.open_table(VOTES)?;
            let existing: Vote = match votes.remove(id)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => return Err(StorageError::NotFound(format!("Vote {id}"))),
            };

            let mut titles = write_txn.open_table(VOTE_TITLE_INDEX)?;
            titles.remove(existing.title.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn health_check(&self) -> StorageResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(VOTES)?;
        Ok(())
    }
}
