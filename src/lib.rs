// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Votes Server - authenticated CRUD service for community votes
//!
//! Users log in with email and password and receive a short-lived bearer
//! token. Anyone may read votes; only a vote's author may create, change,
//! or remove it.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Password login, token issue/verification, request identity
//! - `storage` - Embedded redb storage with constraint checks
//! - `validation` - Input normalization and required-field checks

pub mod api;
pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
pub mod telemetry;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;
