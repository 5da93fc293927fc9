//! Diesel-backed `LoginService` adapter built on `DieselUserRepository`.
//!
//! Resolves a username to its stored user, provisioning a fresh account with
//! zero reputation on first login. Credential verification beyond the
//! username is an identity-provider concern outside this service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::domain::Error;
use crate::domain::persistence_errors::map_user_persistence_error;
use crate::domain::ports::{LoginService, UserRepository};
use crate::domain::user::{User, Username};

use super::diesel_user_repository::DieselUserRepository;

/// Diesel-backed `LoginService` with first-login provisioning.
#[derive(Clone)]
pub struct DieselLoginService {
    users: Arc<dyn UserRepository>,
}

impl DieselLoginService {
    /// Create a new service backed by a Diesel user repository.
    pub fn new(users: DieselUserRepository) -> Self {
        Self {
            users: Arc::new(users),
        }
    }

    #[cfg(test)]
    fn from_repository(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn login(&self, username: &Username) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_username(username.as_ref())
            .await
            .map_err(map_user_persistence_error)?;
        if let Some(user) = existing {
            return Ok(user);
        }

        let user = User::register(username.clone(), Utc::now());
        self.users
            .upsert(&user)
            .await
            .map_err(map_user_persistence_error)?;

        info!(user = %user.id(), "provisioned first-time user");
        Ok(user)
    }
}
