//! # Domain Types
//!
//! Common data structures used across the application logic:
//! registered modlists, entries of the remote feed, and release announcements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A modlist registered with the bot.
/// Serialized as-is into `modlists.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Modlist {
    /// Machine identifier issued by the feed. Never changes once registered.
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub role_id: String,
}

impl Modlist {
    pub fn new(id: &str, name: &str, owner_id: &str, role_id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            owner_id: owner_id.to_string(),
            role_id: role_id.to_string(),
        }
    }
}

/// One modlist as published in the remote feed.
/// Every field is optional at parse time; validation happens during reconciliation.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FeedEntry {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub links: Option<FeedLinks>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FeedLinks {
    #[serde(default, rename = "machineURL")]
    pub machine_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub readme: Option<String>,
}

impl FeedEntry {
    pub fn machine_id(&self) -> Option<&str> {
        self.links.as_ref()?.machine_url.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.links.as_ref()?.image.as_deref()
    }

    pub fn readme(&self) -> Option<&str> {
        self.links.as_ref()?.readme.as_deref()
    }
}

/// Everything the gateway needs to render a release announcement.
#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub modlist_id: String,
    pub modlist_name: String,
    pub version: String,
    pub image_url: Option<String>,
    pub readme_url: Option<String>,
    pub announcer: String,
    pub message: String,
    pub released_at: DateTime<Utc>,
}
