//! Port for user persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::user::User;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
    }
}

/// Port for reading and writing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or update a user record.
    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch the users among the given ids that still exist.
    async fn find_by_ids(&self, ids: Vec<Uuid>) -> Result<Vec<User>, UserPersistenceError>;
}

/// Fixture implementation for wiring without persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn upsert(&self, _user: &User) -> Result<(), UserPersistenceError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }

    async fn find_by_username(
        &self,
        _username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }

    async fn find_by_ids(&self, _ids: Vec<Uuid>) -> Result<Vec<User>, UserPersistenceError> {
        Ok(Vec::new())
    }
}
