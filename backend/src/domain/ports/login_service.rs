//! Driving port resolving a login credential to a user identity.
//!
//! Credential verification is a collaborator concern; adapters decide what a
//! username must prove. The Diesel adapter provisions a first-time user on
//! login.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::Error;
use crate::domain::user::{User, Username};

/// Port for resolving a credential to an authenticated user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Resolve the username to a user, provisioning one if the adapter allows.
    async fn login(&self, username: &Username) -> Result<User, Error>;
}

/// Fixture implementation returning an ephemeral user for the credential.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn login(&self, username: &Username) -> Result<User, Error> {
        Ok(User::register(username.clone(), Utc::now()))
    }
}
