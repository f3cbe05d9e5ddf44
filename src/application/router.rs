//! # Command Router
//!
//! Routes incoming messages to the appropriate command handler (in `interface/commands`).
//! It strips the configured prefix, splits off the command word, and renders the
//! handler's result (reply text or `BotError`) back into the room.

use anyhow::{Result, anyhow};
use std::sync::Arc;

use crate::application::access::AccessController;
use crate::application::reconciler::ReleaseReconciler;
use crate::application::registry::ModlistRegistry;
use crate::domain::error::BotError;
use crate::domain::traits::{ChatProvider, RoleProvider};
use crate::interface::commands;
use crate::strings::messages;

pub struct CommandRouter {
    prefix: String,
    access: AccessController,
    registry: Arc<ModlistRegistry>,
    reconciler: ReleaseReconciler,
}

impl CommandRouter {
    pub fn new(
        prefix: String,
        access: AccessController,
        registry: Arc<ModlistRegistry>,
        reconciler: ReleaseReconciler,
    ) -> Self {
        Self {
            prefix,
            access,
            registry,
            reconciler,
        }
    }

    pub async fn route(
        &self,
        chat: &impl ChatProvider,
        roles: &impl RoleProvider,
        message: &str,
        sender: &str,
    ) -> Result<()> {
        let msg = message.trim();
        let Some(body) = msg.strip_prefix(self.prefix.as_str()) else {
            return Ok(());
        };

        let (cmd, args) = match body.split_once(char::is_whitespace) {
            Some((cmd, args)) => (cmd, args.trim()),
            None => (body, ""),
        };
        tracing::info!(
            "Router dispatching cmd='{}' args='{}' sender='{}'",
            cmd,
            args,
            sender
        );

        let result = match cmd {
            "release" => commands::release::handle_release(&self.reconciler, sender, args).await,
            "addmodlist" => {
                commands::modlists::handle_add(
                    &self.access,
                    &self.registry,
                    &self.reconciler,
                    roles,
                    sender,
                    args,
                )
                .await
            }
            "delmodlist" => {
                commands::modlists::handle_delete(&self.access, &self.registry, roles, sender, args)
                    .await
            }
            "modlists" => commands::modlists::handle_list(&self.access, &self.registry, sender).await,
            "help" => Ok(commands::help::handle_help(&self.prefix)),
            _ => {
                tracing::debug!("Ignoring unknown command '{}'", cmd);
                return Ok(());
            }
        };

        self.reply(chat, cmd, result).await
    }

    async fn reply(
        &self,
        chat: &impl ChatProvider,
        cmd: &str,
        result: Result<String, BotError>,
    ) -> Result<()> {
        match result {
            Ok(content) => {
                chat.send_message(&content).await.map_err(|e| anyhow!(e))?;
            }
            Err(err) => {
                tracing::info!(cmd, kind = err.kind(), error = %err, "Command rejected");
                let content = match &err {
                    BotError::Usage(usage) => messages::usage(&self.prefix, usage),
                    other => messages::error(other),
                };
                chat.send_notification(&content).await.map_err(|e| anyhow!(e))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::reconciler::tests::{StaticFeed, entry};
    use crate::interface::commands::fakes::{FakeChat, FakeRoles};
    use crate::strings::help;
    use tempfile::TempDir;

    const ADMIN: &str = "@admin:example.org";

    async fn router(dir: &TempDir, feed: StaticFeed) -> (CommandRouter, Arc<ModlistRegistry>) {
        let registry = Arc::new(
            ModlistRegistry::load(dir.path().join("modlists.json"))
                .await
                .unwrap(),
        );
        let reconciler =
            ReleaseReconciler::new(registry.clone(), Arc::new(feed), "https://feed".to_string());
        let router = CommandRouter::new(
            "!".to_string(),
            AccessController::new(vec![ADMIN.to_string()]),
            registry.clone(),
            reconciler,
        );
        (router, registry)
    }

    #[tokio::test]
    async fn test_register_then_release() {
        let dir = TempDir::new().unwrap();
        let (router, registry) = router(
            &dir,
            StaticFeed::new(vec![entry(
                "abc123",
                Some("1.2.0"),
                Some("https://img.example/cool.png"),
            )]),
        )
        .await;
        let chat = FakeChat::default();
        let roles = FakeRoles::default();

        router
            .route(&chat, &roles, "!addmodlist @owner:example.org abc123 Cool List", ADMIN)
            .await
            .unwrap();
        assert_eq!(registry.list().await.len(), 1);

        router
            .route(&chat, &roles, "!release abc123 Big update", "@owner:example.org")
            .await
            .unwrap();

        let sent = chat.messages();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], messages::modlist_added("Cool List", "abc123"));
        assert!(sent[1].contains("@owner:example.org just released Cool List 1.2.0!"));
        assert!(sent[1].contains("Big update"));
        assert!(sent[1].contains("https://img.example/cool.png"));
    }

    #[tokio::test]
    async fn test_errors_are_rendered_not_raised() {
        let dir = TempDir::new().unwrap();
        let (router, registry) =
            router(&dir, StaticFeed::new(vec![entry("abc123", Some("1.0"), None)])).await;
        let chat = FakeChat::default();
        let roles = FakeRoles::default();

        router
            .route(&chat, &roles, "!addmodlist @owner:example.org abc123 Cool List", "@eve:x")
            .await
            .unwrap();
        router
            .route(&chat, &roles, "!release abc123 hi", "@owner:example.org")
            .await
            .unwrap();

        let sent = chat.messages();
        assert_eq!(
            sent[0],
            messages::error(&BotError::Forbidden("@eve:x".to_string()))
        );
        assert_eq!(
            sent[1],
            messages::error(&BotError::UnknownModlist("abc123".to_string()))
        );
        assert!(registry.list().await.is_empty());
        assert!(roles.created().is_empty());
    }

    #[tokio::test]
    async fn test_usage_and_help() {
        let dir = TempDir::new().unwrap();
        let (router, _registry) = router(&dir, StaticFeed::new(Vec::new())).await;
        let chat = FakeChat::default();
        let roles = FakeRoles::default();

        router.route(&chat, &roles, "!delmodlist", ADMIN).await.unwrap();
        router.route(&chat, &roles, "  !help  ", "@anyone:x").await.unwrap();

        let sent = chat.messages();
        assert_eq!(sent[0], messages::usage("!", help::DEL_USAGE));
        assert!(sent[1].contains("!release <modlist_id> <message>"));
    }

    #[tokio::test]
    async fn test_ignores_chatter_and_unknown_commands() {
        let dir = TempDir::new().unwrap();
        let (router, _registry) = router(&dir, StaticFeed::new(Vec::new())).await;
        let chat = FakeChat::default();
        let roles = FakeRoles::default();

        for message in ["hello there", "!dance", ".modlists", ""] {
            router.route(&chat, &roles, message, ADMIN).await.unwrap();
        }
        assert!(chat.messages().is_empty());
    }

    #[tokio::test]
    async fn test_list_and_delete_flow() {
        let dir = TempDir::new().unwrap();
        let (router, registry) =
            router(&dir, StaticFeed::new(vec![entry("abc123", Some("1.0"), None)])).await;
        let chat = FakeChat::default();
        let roles = FakeRoles::default();

        router
            .route(&chat, &roles, "!addmodlist @owner:example.org abc123 Cool List", ADMIN)
            .await
            .unwrap();
        router.route(&chat, &roles, "!modlists", ADMIN).await.unwrap();
        router.route(&chat, &roles, "!delmodlist abc123", ADMIN).await.unwrap();
        router.route(&chat, &roles, "!modlists", ADMIN).await.unwrap();

        let sent = chat.messages();
        assert!(sent[1].contains("**Cool List** `abc123`"));
        assert_eq!(sent[2], messages::modlist_deleted("abc123"));
        assert_eq!(sent[3], messages::NO_MODLISTS);
        assert_eq!(roles.created(), roles.deleted());
        assert!(registry.list().await.is_empty());
    }
}
