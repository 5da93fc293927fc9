//! Profile read use-case.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::persistence_errors::map_user_persistence_error;
use crate::domain::ports::{UserProfileQuery, UserRepository};
use crate::domain::user::User;

/// Profile service implementing the profile driving port.
#[derive(Clone)]
pub struct UserProfileService<U> {
    users: Arc<U>,
}

impl<U> UserProfileService<U> {
    /// Create a new service over the user repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> UserProfileQuery for UserProfileService<U>
where
    U: UserRepository,
{
    async fn get_profile(&self, user_id: Uuid) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }
}
