//! # Command Handlers
//!
//! Contains specific handler functions for each supported command (e.g., release, addmodlist).
//! These handlers are invoked by the Router and return either the reply text or a `BotError`.

pub mod help;
pub mod modlists;
pub mod release;

#[cfg(test)]
pub(crate) mod fakes {
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::domain::error::BotError;
    use crate::domain::traits::{ChatProvider, RoleProvider};

    /// Records everything sent to the room.
    #[derive(Default)]
    pub struct FakeChat {
        pub sent: Mutex<Vec<String>>,
    }

    impl FakeChat {
        pub fn messages(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatProvider for FakeChat {
        async fn send_message(&self, content: &str) -> Result<String, String> {
            let mut sent = self.sent.lock().unwrap();
            sent.push(content.to_string());
            Ok(format!("$event{}", sent.len()))
        }

        async fn send_notification(&self, content: &str) -> Result<(), String> {
            self.sent.lock().unwrap().push(content.to_string());
            Ok(())
        }

        fn room_id(&self) -> String {
            "!room:example.org".to_string()
        }
    }

    /// Hands out sequential role ids and remembers which were created or deleted.
    #[derive(Default)]
    pub struct FakeRoles {
        pub created: Mutex<Vec<String>>,
        pub deleted: Mutex<Vec<String>>,
        pub deny_create: bool,
        pub deny_delete: bool,
    }

    impl FakeRoles {
        pub fn created(&self) -> Vec<String> {
            self.created.lock().unwrap().clone()
        }

        pub fn deleted(&self) -> Vec<String> {
            self.deleted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RoleProvider for FakeRoles {
        async fn create_role(&self, name: &str) -> Result<String, BotError> {
            if self.deny_create {
                return Err(BotError::NoPermission);
            }
            let mut created = self.created.lock().unwrap();
            let role_id = format!("!role{}:example.org", created.len() + 1);
            tracing::debug!(name, role_id = %role_id, "Fake role created");
            created.push(role_id.clone());
            Ok(role_id)
        }

        async fn delete_role(&self, role_id: &str) -> Result<(), BotError> {
            if self.deny_delete {
                return Err(BotError::NoPermission);
            }
            self.deleted.lock().unwrap().push(role_id.to_string());
            Ok(())
        }
    }
}
