//! # Matrix Service Adapter
//!
//! Implements `ChatProvider` and `RoleProvider` for the Matrix protocol using the `matrix_sdk`.
//! Matrix has no server roles, so a modlist role is a dedicated private room
//! named after the modlist; its room id is the role id.

use crate::domain::error::BotError;
use crate::domain::traits::{ChatProvider, RoleProvider};
use async_trait::async_trait;
use matrix_sdk::room::Room;
use matrix_sdk::ruma::RoomId;
use matrix_sdk::ruma::api::client::error::ErrorKind;
use matrix_sdk::ruma::api::client::room::create_room;
use matrix_sdk::ruma::events::room::message::RoomMessageEventContent;

#[derive(Clone)]
pub struct MatrixService {
    room: Room,
}

impl MatrixService {
    pub fn new(room: Room) -> Self {
        Self { room }
    }
}

/// `M_FORBIDDEN` means the bot lacks the rights; anything else is a transport problem.
fn role_error(err: matrix_sdk::Error) -> BotError {
    if matches!(err.client_api_error_kind(), Some(ErrorKind::Forbidden { .. })) {
        BotError::NoPermission
    } else {
        BotError::Gateway(err.to_string())
    }
}

#[async_trait]
impl ChatProvider for MatrixService {
    fn room_id(&self) -> String {
        self.room.room_id().as_str().to_string()
    }

    async fn send_message(&self, content: &str) -> Result<String, String> {
        tracing::info!("Bot sending message to {}: {}", self.room_id(), content);
        self.room
            .send(RoomMessageEventContent::text_markdown(content))
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }

    async fn send_notification(&self, content: &str) -> Result<(), String> {
        // Notifications are also markdown messages for now
        self.send_message(content).await.map(|_| ())
    }
}

#[async_trait]
impl RoleProvider for MatrixService {
    async fn create_role(&self, name: &str) -> Result<String, BotError> {
        let mut request = create_room::v3::Request::new();
        request.name = Some(name.to_string());

        let room = self
            .room
            .client()
            .create_room(request)
            .await
            .map_err(role_error)?;
        tracing::info!("Created role room {} for '{}'", room.room_id(), name);
        Ok(room.room_id().to_string())
    }

    async fn delete_role(&self, role_id: &str) -> Result<(), BotError> {
        let room_id = RoomId::parse(role_id).map_err(|e| BotError::Gateway(e.to_string()))?;
        let Some(room) = self.room.client().get_room(&room_id) else {
            tracing::debug!("Role room {} already gone", role_id);
            return Ok(());
        };

        room.leave().await.map_err(role_error)?;
        tracing::info!("Left role room {}", role_id);

        // Once left, the role no longer gates anything; forgetting only drops it from the store.
        if let Err(e) = room.forget().await {
            tracing::warn!("Failed to forget role room {}: {}", role_id, e);
        }
        Ok(())
    }
}
