// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;
use std::time::Duration;

use crate::{
    auth::{CredentialVerifier, TokenService},
    config::DEFAULT_REQUEST_TIMEOUT,
    storage::{UserStore, VoteDatabase, VoteStore},
};

/// Shared application state.
///
/// Holds only capabilities and the store; nothing request-specific
/// (in particular no caller identity) is ever written here.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub votes: Arc<dyn VoteStore>,
    pub tokens: Arc<dyn TokenService>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        db: Arc<VoteDatabase>,
        tokens: Arc<dyn TokenService>,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            users: db.clone(),
            votes: db,
            tokens,
            credentials,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Replace the vote store (e.g. with an instrumented wrapper).
    pub fn with_vote_store(mut self, votes: Arc<dyn VoteStore>) -> Self {
        self.votes = votes;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
