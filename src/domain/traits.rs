//! # Domain Traits
//!
//! Abstract interfaces for the collaborators the bot talks to (chat, roles, feed).
//! Allows for pluggable implementations in the Infrastructure layer.

use async_trait::async_trait;

use crate::domain::error::BotError;
use crate::domain::types::FeedEntry;

/// Abstract interface for a Chat Provider (e.g., Matrix, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to the room
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Send a notification (not tracked/editable)
    async fn send_notification(&self, content: &str) -> Result<(), String>;

    /// Get the current room ID
    fn room_id(&self) -> String;
}

/// Creates and removes the access-control role tied to a modlist.
#[async_trait]
pub trait RoleProvider: Send + Sync {
    /// Returns the id of the new role. `BotError::NoPermission` if the platform refuses.
    async fn create_role(&self, name: &str) -> Result<String, BotError>;

    /// Deleting a role that no longer exists succeeds.
    async fn delete_role(&self, role_id: &str) -> Result<(), BotError>;
}

/// Source of the authoritative modlist feed.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Every failure (transport, status, decoding) is `BotError::FeedUnavailable`.
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>, BotError>;
}
