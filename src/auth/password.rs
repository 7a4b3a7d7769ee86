// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing and verification (bcrypt).

use bcrypt::{hash, verify, DEFAULT_COST};

/// Candidate used to keep failed lookups as slow as failed comparisons.
const DUMMY_PASSWORD: &str = "no-such-user-placeholder";

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The candidate does not match the stored hash.
    #[error("credentials do not match")]
    Mismatch,
    /// The stored hash could not be parsed.
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
    /// Hash computation failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Salted one-way password hashing.
pub trait CredentialVerifier: Send + Sync {
    /// Produce a new salted hash for `password`.
    fn hash(&self, password: &str) -> Result<String, CredentialError>;

    /// Check `candidate` against `stored_hash`.
    ///
    /// Returns [`CredentialError::Mismatch`] only for a wrong password; a hash
    /// that cannot be parsed is [`CredentialError::MalformedHash`].
    fn verify(&self, stored_hash: &str, candidate: &str) -> Result<(), CredentialError>;

    /// Spend the same effort as [`verify`](Self::verify) when no user matched.
    fn verify_unknown_user(&self, candidate: &str);
}

/// bcrypt implementation of [`CredentialVerifier`].
pub struct BcryptCredentials {
    cost: u32,
    dummy_hash: String,
}

impl BcryptCredentials {
    /// Create with an explicit cost factor.
    pub fn new(cost: u32) -> Result<Self, CredentialError> {
        let dummy_hash =
            hash(DUMMY_PASSWORD, cost).map_err(|e| CredentialError::Hashing(e.to_string()))?;
        Ok(Self { cost, dummy_hash })
    }

    /// Create with bcrypt's default cost.
    pub fn with_default_cost() -> Result<Self, CredentialError> {
        Self::new(DEFAULT_COST)
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl CredentialVerifier for BcryptCredentials {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        hash(password, self.cost).map_err(|e| CredentialError::Hashing(e.to_string()))
    }

    fn verify(&self, stored_hash: &str, candidate: &str) -> Result<(), CredentialError> {
        match verify(candidate, stored_hash) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CredentialError::Mismatch),
            Err(e) => Err(CredentialError::MalformedHash(e.to_string())),
        }
    }

    fn verify_unknown_user(&self, candidate: &str) {
        let _ = verify(candidate, &self.dummy_hash);
    }
}
