//! Moderation use-case: toggling a user's ban flag.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::persistence_errors::map_user_persistence_error;
use crate::domain::ports::{BanReceipt, ModerationCommand, UserRepository};

/// Moderation service implementing the moderation driving port.
#[derive(Clone)]
pub struct ModerationService<U> {
    users: Arc<U>,
}

impl<U> ModerationService<U> {
    /// Create a new service over the user repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> ModerationCommand for ModerationService<U>
where
    U: UserRepository,
{
    async fn toggle_ban(&self, user_id: Uuid) -> Result<BanReceipt, Error> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))?;

        let is_banned = user.toggle_banned();
        self.users
            .upsert(&user)
            .await
            .map_err(map_user_persistence_error)?;

        info!(user = %user_id, banned = is_banned, "ban flag toggled");
        Ok(BanReceipt { user_id, is_banned })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::test_fixtures::{banned_user, user_with};

    #[tokio::test]
    async fn bans_an_active_user() {
        let user = user_with(Uuid::new_v4(), "spammer", 0);
        let user_id = user.id();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(user)));
        users
            .expect_upsert()
            .times(1)
            .withf(|user| user.is_banned())
            .return_once(|_| Ok(()));

        let receipt = ModerationService::new(Arc::new(users))
            .toggle_ban(user_id)
            .await
            .expect("toggle succeeds");
        assert!(receipt.is_banned);
    }

    #[tokio::test]
    async fn unbans_a_banned_user() {
        let user = banned_user(Uuid::new_v4(), "reformed");
        let user_id = user.id();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(user)));
        users
            .expect_upsert()
            .times(1)
            .withf(|user| !user.is_banned())
            .return_once(|_| Ok(()));

        let receipt = ModerationService::new(Arc::new(users))
            .toggle_ban(user_id)
            .await
            .expect("toggle succeeds");
        assert!(!receipt.is_banned);
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let error = ModerationService::new(Arc::new(users))
            .toggle_ban(Uuid::new_v4())
            .await
            .expect_err("missing user");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
