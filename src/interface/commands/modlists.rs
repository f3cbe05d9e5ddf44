//! # Modlist Administration
//!
//! Handles `addmodlist`, `delmodlist` and `modlists`.
//! Every handler authorizes the sender before touching the feed, roles or registry.

use regex::Regex;
use std::sync::OnceLock;

use crate::application::access::AccessController;
use crate::application::reconciler::ReleaseReconciler;
use crate::application::registry::ModlistRegistry;
use crate::domain::error::BotError;
use crate::domain::traits::RoleProvider;
use crate::strings::{help, messages};

fn user_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^@[^\s:]+:\S+$").expect("valid user id pattern"))
}

/// Accepts a Matrix user id such as `@owner:example.org`.
fn parse_user(user: &str) -> Result<&str, BotError> {
    if user_id_pattern().is_match(user) {
        Ok(user)
    } else {
        Err(BotError::InvalidUser(user.to_string()))
    }
}

/// `addmodlist <user> <modlist_id> <name...>`
///
/// The role is created before the record is written. If writing the record
/// fails the role is deleted again.
pub async fn handle_add(
    access: &AccessController,
    registry: &ModlistRegistry,
    reconciler: &ReleaseReconciler,
    roles: &impl RoleProvider,
    sender: &str,
    args: &str,
) -> Result<String, BotError> {
    access.authorize(sender)?;

    let mut parts = args.split_whitespace();
    let (Some(user), Some(modlist_id)) = (parts.next(), parts.next()) else {
        return Err(BotError::Usage(help::ADD_USAGE));
    };
    let name = parts.collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        return Err(BotError::Usage(help::ADD_USAGE));
    }
    let owner_id = parse_user(user)?;

    reconciler.feed_entry(modlist_id).await?;
    if registry.get_by_id(modlist_id).await.is_some() {
        return Err(BotError::AlreadyExists(modlist_id.to_string()));
    }

    let role_id = roles.create_role(&name).await?;
    match registry.add(modlist_id, &name, owner_id, &role_id).await {
        Ok(modlist) => {
            tracing::info!(
                modlist = %modlist.id,
                owner = %modlist.owner_id,
                role = %modlist.role_id,
                "Registered modlist"
            );
            Ok(messages::modlist_added(&modlist.name, &modlist.id))
        }
        Err(e) => {
            if let Err(cleanup) = roles.delete_role(&role_id).await {
                tracing::error!(
                    role = %role_id,
                    error = %cleanup,
                    "Failed to remove role of aborted registration"
                );
            }
            Err(e)
        }
    }
}

/// `delmodlist <modlist_id>`
pub async fn handle_delete(
    access: &AccessController,
    registry: &ModlistRegistry,
    roles: &impl RoleProvider,
    sender: &str,
    args: &str,
) -> Result<String, BotError> {
    access.authorize(sender)?;

    let modlist_id = args
        .split_whitespace()
        .next()
        .ok_or(BotError::Usage(help::DEL_USAGE))?;
    let modlist = registry
        .get_by_id(modlist_id)
        .await
        .ok_or_else(|| BotError::NotFound(modlist_id.to_string()))?;

    // A failed removal after this point leaves a record whose role is gone;
    // retrying succeeds since deleting a missing role is a no-op.
    roles.delete_role(&modlist.role_id).await?;
    registry.remove(&modlist).await?;

    tracing::info!(modlist = %modlist.id, "Deleted modlist");
    Ok(messages::modlist_deleted(&modlist.id))
}

/// `modlists`
pub async fn handle_list(
    access: &AccessController,
    registry: &ModlistRegistry,
    sender: &str,
) -> Result<String, BotError> {
    access.authorize(sender)?;
    Ok(messages::modlist_listing(&registry.list().await))
}
