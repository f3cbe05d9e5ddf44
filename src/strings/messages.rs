//! # Messages
//!
//! Format functions for user-facing messages: command replies, the release
//! announcement, and the rendering of every `BotError`.

use crate::domain::error::BotError;
use crate::domain::types::{Announcement, Modlist};

pub const NO_MODLISTS: &str = "No modlists registered.";

pub fn modlist_added(name: &str, id: &str) -> String {
    format!("Modlist {name} with ID `{id}` was added to the database.")
}

pub fn modlist_deleted(id: &str) -> String {
    format!("Modlist with ID `{id}` was deleted.")
}

pub fn modlist_listing(modlists: &[Modlist]) -> String {
    if modlists.is_empty() {
        return NO_MODLISTS.to_string();
    }
    let mut out = format!("**📋 Modlists ({})**\n", modlists.len());
    for m in modlists {
        out.push_str(&format!(
            "* **{}** `{}` owner: {} role: `{}`\n",
            m.name, m.id, m.owner_id, m.role_id
        ));
    }
    out
}

pub fn release_announcement(a: &Announcement) -> String {
    let mut out = format!(
        "### {} just released {} {}!\n",
        a.announcer, a.modlist_name, a.version
    );
    if !a.message.is_empty() {
        out.push_str(&format!("\n{}\n", a.message));
    }
    if let Some(readme) = &a.readme_url {
        out.push_str(&format!("\n📖 [Readme]({readme})"));
    }
    if let Some(image) = &a.image_url {
        out.push_str(&format!("\n🖼️ [Image]({image})"));
    }
    out.push_str(&format!(
        "\n\n_WabbaBot · {}_",
        a.released_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out
}

pub fn usage(prefix: &str, usage: &str) -> String {
    format!("Usage: `{prefix}{usage}`")
}

pub fn error(err: &BotError) -> String {
    let detail = match err {
        BotError::AlreadyExists(id) => format!("Modlist with id {id} already exists"),
        BotError::NotFound(id) | BotError::UnknownModlist(id) => {
            format!("Modlist with id {id} not found")
        }
        BotError::FeedMismatch(_) => "Modlist does not exist in external modlists JSON".to_string(),
        BotError::MalformedFeedEntry { id, field } => {
            format!("External modlists JSON entry for {id} has no {field}")
        }
        BotError::FeedUnavailable(_) => "Could not fetch the external modlists JSON".to_string(),
        BotError::Forbidden(user) => format!("User {user} has no privileges for this action"),
        BotError::PersistenceFailure(_) => "Could not save the modlist database".to_string(),
        BotError::NoPermission => "I don't have permission to manage roles".to_string(),
        BotError::Gateway(e) => format!("Chat service error: {e}"),
        BotError::Usage(_) => "Missing arguments".to_string(),
        BotError::InvalidUser(user) => format!("Invalid user provided: {user}"),
    };
    format!("An error occurred! **{detail}.**")
}
