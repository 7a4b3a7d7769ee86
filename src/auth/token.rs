// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token issuing and verification.
//!
//! Tokens are HS256 JWTs carrying `user_id`, `iat` and `exp`. Verification
//! is pure: it recomputes the signature with the injected secret and checks
//! expiry against the service's clock. Nothing is stored server-side.
//!
//! The secret is supplied at startup (see `TOKEN_SECRET` in [`crate::config`]).

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use super::claims::{AuthenticatedUser, TokenClaims};

/// Default token validity window (1 hour).
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Why a token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    SignatureInvalid,
    #[error("token has expired")]
    Expired,
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Wall clock used for issue and expiry times (Unix seconds).
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// [`Clock`] backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Issues tokens for a user.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user_id: u64) -> Result<String, TokenError>;
}

/// Verifies tokens and returns the identity they carry.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<AuthenticatedUser, TokenError>;
}

/// Both halves of the token capability, as stored in application state.
pub trait TokenService: TokenIssuer + TokenVerifier {}

impl<T: TokenIssuer + TokenVerifier> TokenService for T {}

/// HS256 JWT implementation of [`TokenService`].
#[derive(Clone)]
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    validity: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Create a service signing with `secret`, using the system clock.
    pub fn new(secret: &[u8], validity: Duration) -> Self {
        Self::with_clock(secret, validity, Arc::new(SystemClock))
    }

    /// Create a service with an explicit clock.
    pub fn with_clock(secret: &[u8], validity: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against `clock`, not the library's own time source.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            validity,
            clock,
        }
    }

    /// The validity window applied to newly issued tokens.
    pub fn validity(&self) -> Duration {
        self.validity
    }

    fn validity_secs(&self) -> i64 {
        i64::try_from(self.validity.as_secs()).unwrap_or(i64::MAX)
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, user_id: u64) -> Result<String, TokenError> {
        let iat = self.clock.now();
        let claims = TokenClaims {
            authorized: true,
            user_id,
            iat,
            exp: iat.saturating_add(self.validity_secs()),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

impl TokenVerifier for JwtTokenService {
    fn verify(&self, token: &str) -> Result<AuthenticatedUser, TokenError> {
        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::SignatureInvalid
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        let claims = token_data.claims;
        if !claims.authorized || claims.user_id == 0 {
            return Err(TokenError::Malformed);
        }
        if self.clock.now() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(AuthenticatedUser::from_claims(claims))
    }
}
