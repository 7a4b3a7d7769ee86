// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Records written to and read from the database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AccessLevel, User};

/// User as persisted, including the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredUser {
    pub id: u64,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub access_level: AccessLevel,
    pub created_at: DateTime<Utc>,
}

impl From<StoredUser> for User {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            access_level: user.access_level,
            created_at: user.created_at,
        }
    }
}

/// A user about to be inserted. The id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub access_level: AccessLevel,
}

/// Normalized vote fields for an insert or a full replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVote {
    pub title: String,
    pub description: String,
    pub author_id: u64,
}
