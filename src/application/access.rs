//! # Access Control
//!
//! Gatekeeper for privileged commands. The admin set comes from configuration
//! and never changes while the bot is running.

use std::collections::HashSet;

use crate::domain::error::BotError;

#[derive(Debug, Clone, Default)]
pub struct AccessController {
    admins: HashSet<String>,
}

impl AccessController {
    pub fn new(admins: impl IntoIterator<Item = String>) -> Self {
        Self {
            admins: admins.into_iter().collect(),
        }
    }

    /// `Ok(())` iff `actor` is exactly one of the configured admins.
    /// Matrix user ids are case-sensitive, so no folding happens here.
    pub fn authorize(&self, actor: &str) -> Result<(), BotError> {
        if self.admins.contains(actor) {
            Ok(())
        } else {
            tracing::warn!(actor, "Rejected privileged command");
            Err(BotError::Forbidden(actor.to_string()))
        }
    }
}
