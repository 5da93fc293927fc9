//! User identity, reputation, and ban state.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::reputation::{NegativeReputation, Reputation};

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The username was empty once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// The username was shorter than the minimum.
    #[error("username must be at least {min} characters")]
    UsernameTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// The username exceeded the maximum.
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The username contained characters outside the accepted set.
    #[error("username may only contain letters, numbers, underscores, or hyphens")]
    UsernameInvalidCharacters,
    /// Stored reputation was negative.
    #[error(transparent)]
    NegativeReputation(#[from] NegativeReputation),
}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 30;

/// Validated handle the user is known by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        let length = username.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Unvalidated field bundle for rebuilding a stored user.
#[derive(Debug, Clone)]
pub struct UserDraft {
    /// Stable identifier.
    pub id: Uuid,
    /// Validated handle.
    pub username: Username,
    /// Stored reputation points.
    pub reputation: i64,
    /// Whether moderation has banned the account.
    pub is_banned: bool,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

/// Application user.
///
/// ## Invariants
/// - `reputation` never goes below zero regardless of applied deltas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Uuid,
    username: Username,
    reputation: Reputation,
    is_banned: bool,
    created_at: DateTime<Utc>,
}

impl User {
    /// Rebuild a user from stored fields.
    pub fn new(draft: UserDraft) -> Result<Self, UserValidationError> {
        let UserDraft {
            id,
            username,
            reputation,
            is_banned,
            created_at,
        } = draft;
        Ok(Self {
            id,
            username,
            reputation: Reputation::new(reputation)?,
            is_banned,
            created_at,
        })
    }

    /// Create a brand-new user with zero reputation.
    #[must_use]
    pub fn register(username: Username, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            reputation: Reputation::zero(),
            is_banned: false,
            created_at: now,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Handle the user is known by.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Current reputation total.
    #[must_use]
    pub fn reputation(&self) -> Reputation {
        self.reputation
    }

    /// Whether moderation has banned the account.
    #[must_use]
    pub fn is_banned(&self) -> bool {
        self.is_banned
    }

    /// Account creation time.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Fold a reputation delta into the running total, clamped at zero.
    pub fn apply_reputation_delta(&mut self, delta: i64) {
        self.reputation.apply(delta);
    }

    /// Flip the ban flag and return the new state.
    pub fn toggle_banned(&mut self) -> bool {
        self.is_banned = !self.is_banned;
        self.is_banned
    }
}
