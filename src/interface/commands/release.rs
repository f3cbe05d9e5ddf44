//! # Release Command
//!
//! Handles `release <modlist_id> <message>`.
//! Announces a new version of a registered modlist, taking the version and
//! artwork from the modlist feed and the body from the announcer's text.

use crate::application::reconciler::ReleaseReconciler;
use crate::domain::error::BotError;
use crate::strings::{help, messages};

pub async fn handle_release(
    reconciler: &ReleaseReconciler,
    sender: &str,
    args: &str,
) -> Result<String, BotError> {
    let args = args.trim();
    let (modlist_id, message) = match args.split_once(char::is_whitespace) {
        Some((id, rest)) => (id, rest.trim()),
        None => (args, ""),
    };
    if modlist_id.is_empty() {
        return Err(BotError::Usage(help::RELEASE_USAGE));
    }

    let announcement = reconciler.reconcile(modlist_id, sender, message).await?;
    tracing::info!(
        modlist = %announcement.modlist_id,
        version = %announcement.version,
        announcer = sender,
        "Announcing release"
    );
    Ok(messages::release_announcement(&announcement))
}
