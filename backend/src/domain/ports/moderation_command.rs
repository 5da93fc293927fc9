//! Driving port for moderation actions.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;

/// Result of a ban toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BanReceipt {
    /// The affected user.
    pub user_id: Uuid,
    /// The user's ban state after the toggle.
    pub is_banned: bool,
}

/// Port for moderation use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModerationCommand: Send + Sync {
    /// Flip a user's ban flag and persist the change.
    async fn toggle_ban(&self, user_id: Uuid) -> Result<BanReceipt, Error>;
}

/// Fixture implementation that reports the user as banned.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureModerationCommand;

#[async_trait]
impl ModerationCommand for FixtureModerationCommand {
    async fn toggle_ban(&self, user_id: Uuid) -> Result<BanReceipt, Error> {
        Ok(BanReceipt {
            user_id,
            is_banned: true,
        })
    }
}
