// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Input Validation
//!
//! Request bodies are normalized (surrounding whitespace trimmed) and then
//! checked field by field. The first failing check wins.
//!
//! Vote title uniqueness is not checked here: it is enforced by the store
//! when the write is attempted and reported as a constraint violation (see
//! [`crate::storage::Constraint::UniqueVoteTitle`]).

use crate::{
    models::{LoginRequest, RegisterUserRequest, VoteRequest},
    storage::NewVote,
};

/// A required field is missing or a field is not well-formed.
///
/// The `Display` text is the message returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Required Title")]
    RequiredTitle,
    #[error("Required Description")]
    RequiredDescription,
    #[error("Required Author")]
    RequiredAuthor,
    #[error("Required Email")]
    RequiredEmail,
    #[error("Invalid Email")]
    InvalidEmail,
    #[error("Required Password")]
    RequiredPassword,
    #[error("Required Display Name")]
    RequiredDisplayName,
}

// =============================================================================
// Votes
// =============================================================================

/// Trim the text fields of a vote request.
pub fn normalize_vote(request: VoteRequest) -> NewVote {
    NewVote {
        title: request.title.trim().to_string(),
        description: request.description.trim().to_string(),
        author_id: request.author_id,
    }
}

/// Check required vote fields in order: title, description, author.
pub fn validate_vote(vote: &NewVote) -> Result<(), ValidationError> {
    if vote.title.is_empty() {
        return Err(ValidationError::RequiredTitle);
    }
    if vote.description.is_empty() {
        return Err(ValidationError::RequiredDescription);
    }
    if vote.author_id == 0 {
        return Err(ValidationError::RequiredAuthor);
    }
    Ok(())
}

// =============================================================================
// Users
// =============================================================================

pub fn normalize_login(request: LoginRequest) -> LoginRequest {
    LoginRequest {
        email: request.email.trim().to_string(),
        password: request.password,
    }
}

pub fn validate_login(request: &LoginRequest) -> Result<(), ValidationError> {
    if request.email.is_empty() {
        return Err(ValidationError::RequiredEmail);
    }
    if request.password.is_empty() {
        return Err(ValidationError::RequiredPassword);
    }
    if !is_valid_email(&request.email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn normalize_registration(request: RegisterUserRequest) -> RegisterUserRequest {
    RegisterUserRequest {
        email: request.email.trim().to_string(),
        password: request.password,
        display_name: request.display_name.trim().to_string(),
    }
}

pub fn validate_registration(request: &RegisterUserRequest) -> Result<(), ValidationError> {
    if request.display_name.is_empty() {
        return Err(ValidationError::RequiredDisplayName);
    }
    if request.email.is_empty() {
        return Err(ValidationError::RequiredEmail);
    }
    if !is_valid_email(&request.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if request.password.is_empty() {
        return Err(ValidationError::RequiredPassword);
    }
    Ok(())
}

/// Structural email check: `local@domain.tld`, no whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, description: &str, author_id: u64) -> VoteRequest {
        VoteRequest {
            title: title.to_string(),
            description: description.to_string(),
            author_id,
        }
    }

    #[test]
    fn normalize_trims_text_fields() {
        let vote = normalize_vote(request("  The title ", "\tDescription\n", 3));
        assert_eq!(
            vote,
            NewVote {
                title: "The title".to_string(),
                description: "Description".to_string(),
                author_id: 3,
            }
        );
    }

    #[test]
    fn whitespace_only_title_is_required() {
        let vote = normalize_vote(request("   ", "d", 1));
        assert_eq!(validate_vote(&vote), Err(ValidationError::RequiredTitle));
    }

    #[test]
    fn first_failing_check_wins() {
        let vote = normalize_vote(request("", "", 0));
        assert_eq!(validate_vote(&vote), Err(ValidationError::RequiredTitle));

        let vote = normalize_vote(request("t", "", 0));
        assert_eq!(validate_vote(&vote), Err(ValidationError::RequiredDescription));

        let vote = normalize_vote(request("t", "d", 0));
        assert_eq!(validate_vote(&vote), Err(ValidationError::RequiredAuthor));

        let vote = normalize_vote(request("t", "d", 1));
        assert_eq!(validate_vote(&vote), Ok(()));
    }

    #[test]
    fn messages_match_error_bodies() {
        assert_eq!(ValidationError::RequiredTitle.to_string(), "Required Title");
        assert_eq!(
            ValidationError::RequiredDescription.to_string(),
            "Required Description"
        );
        assert_eq!(ValidationError::RequiredAuthor.to_string(), "Required Author");
    }

    #[test]
    fn login_requires_email_and_password() {
        let login = normalize_login(LoginRequest {
            email: "  ".into(),
            password: "password".into(),
        });
        assert_eq!(validate_login(&login), Err(ValidationError::RequiredEmail));

        let login = LoginRequest {
            email: "pet@gmail.com".into(),
            password: String::new(),
        };
        assert_eq!(validate_login(&login), Err(ValidationError::RequiredPassword));

        let login = LoginRequest {
            email: "pet-at-gmail".into(),
            password: "password".into(),
        };
        assert_eq!(validate_login(&login), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn registration_checks_display_name_first() {
        let registration = normalize_registration(RegisterUserRequest {
            email: "".into(),
            password: "".into(),
            display_name: " ".into(),
        });
        assert_eq!(
            validate_registration(&registration),
            Err(ValidationError::RequiredDisplayName)
        );
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("steven@gmail.com"));
        assert!(is_valid_email("a.b+c@mail.example.org"));
        assert!(!is_valid_email("@gmail.com"));
        assert!(!is_valid_email("steven@gmail"));
        assert!(!is_valid_email("steven@.com"));
        assert!(!is_valid_email("ste ven@gmail.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }
}
