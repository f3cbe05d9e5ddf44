//! # Release Reconciler
//!
//! Cross-references a registered modlist with the authoritative feed and
//! assembles the release announcement. The version always comes from the
//! feed, never from the announcer's text.

use std::sync::Arc;

use chrono::Utc;

use crate::application::registry::ModlistRegistry;
use crate::domain::error::BotError;
use crate::domain::traits::FeedFetcher;
use crate::domain::types::{Announcement, FeedEntry};

pub struct ReleaseReconciler {
    registry: Arc<ModlistRegistry>,
    fetcher: Arc<dyn FeedFetcher>,
    feed_url: String,
}

impl ReleaseReconciler {
    pub fn new(
        registry: Arc<ModlistRegistry>,
        fetcher: Arc<dyn FeedFetcher>,
        feed_url: String,
    ) -> Self {
        Self {
            registry,
            fetcher,
            feed_url,
        }
    }

    /// Builds the announcement for a release of `modlist_id`.
    pub async fn reconcile(
        &self,
        modlist_id: &str,
        announcer: &str,
        message: &str,
    ) -> Result<Announcement, BotError> {
        // The registry lock is released before the fetch starts.
        let modlist = self
            .registry
            .get_by_id(modlist_id)
            .await
            .ok_or_else(|| BotError::UnknownModlist(modlist_id.to_string()))?;

        let entry = self.feed_entry(modlist_id).await?;
        let version = entry
            .version
            .clone()
            .ok_or_else(|| BotError::MalformedFeedEntry {
                id: modlist_id.to_string(),
                field: "version",
            })?;

        Ok(Announcement {
            modlist_id: modlist.id,
            modlist_name: modlist.name,
            version,
            image_url: entry.image().map(str::to_string),
            readme_url: entry.readme().map(str::to_string),
            announcer: announcer.to_string(),
            message: message.to_string(),
            released_at: Utc::now(),
        })
    }

    /// Fetches the feed and returns the entry whose machine id is `modlist_id`.
    pub async fn feed_entry(&self, modlist_id: &str) -> Result<FeedEntry, BotError> {
        let entries = self.fetcher.fetch(&self.feed_url).await.inspect_err(|e| {
            tracing::warn!(url = %self.feed_url, error = %e, "Modlist feed fetch failed");
        })?;

        entries
            .into_iter()
            .find(|entry| entry.machine_id() == Some(modlist_id))
            .ok_or_else(|| BotError::FeedMismatch(modlist_id.to_string()))
    }
}
