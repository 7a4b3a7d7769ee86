// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Password login and bearer-token authentication for the votes API.
//!
//! ## Auth Flow
//!
//! 1. Client posts email + password to `/v1/login`
//! 2. Server verifies the bcrypt hash and issues an HS256 token carrying
//!    `authorized`, `user_id` and `exp`
//! 3. Client sends `Authorization: Bearer <token>` on protected requests
//! 4. The [`Auth`] extractor verifies signature and expiry and yields the
//!    acting [`AuthenticatedUser`] for that request only
//!
//! ## Security
//!
//! - Every rejection returns the same `{"error":"Unauthorized"}` body
//! - Unknown email and wrong password are indistinguishable to the caller
//! - The signing secret never leaves [`JwtTokenService`]

pub mod claims;
pub mod error;
pub mod extractor;
pub mod password;
pub mod token;

pub use claims::{AuthenticatedUser, TokenClaims};
pub use error::{AuthError, UNAUTHORIZED_MESSAGE};
pub use extractor::{authenticate, Auth};
pub use password::{BcryptCredentials, CredentialError, CredentialVerifier};
pub use token::{
    Clock, JwtTokenService, SystemClock, TokenError, TokenIssuer, TokenService, TokenVerifier,
    DEFAULT_TOKEN_TTL,
};
