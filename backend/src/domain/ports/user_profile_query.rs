//! Driving port for reading user profiles.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::user::User;

/// Port for the profile read use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Load a user's profile.
    async fn get_profile(&self, user_id: Uuid) -> Result<User, Error>;
}

/// Fixture implementation with no users.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserProfileQuery;

#[async_trait]
impl UserProfileQuery for FixtureUserProfileQuery {
    async fn get_profile(&self, user_id: Uuid) -> Result<User, Error> {
        Err(Error::not_found(format!("user {user_id} not found")))
    }
}
