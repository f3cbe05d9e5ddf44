//! # Modlist Registry
//!
//! The durable set of registered modlists (`data/modlists.json`).
//! Mutations hold the write lock across read-modify-persist and only swap in
//! the new collection once it is safely on disk, so readers see a change
//! either completely or not at all.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::domain::error::BotError;
use crate::domain::types::Modlist;

pub struct ModlistRegistry {
    path: PathBuf,
    modlists: RwLock<Vec<Modlist>>,
}

impl ModlistRegistry {
    /// Loads the registry from `path`. A missing file is an empty registry;
    /// an unreadable or corrupt one is an error so it never gets overwritten.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, BotError> {
        let path = path.into();
        let modlists: Vec<Modlist> = match fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                BotError::PersistenceFailure(format!("{}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(BotError::PersistenceFailure(format!(
                    "{}: {e}",
                    path.display()
                )));
            }
        };

        tracing::info!(
            count = modlists.len(),
            path = %path.display(),
            "Loaded modlist registry"
        );

        Ok(Self {
            path,
            modlists: RwLock::new(modlists),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Registers a new modlist and persists the registry before returning.
    pub async fn add(
        &self,
        id: &str,
        name: &str,
        owner_id: &str,
        role_id: &str,
    ) -> Result<Modlist, BotError> {
        let mut guard = self.modlists.write().await;
        if guard.iter().any(|m| m.id == id) {
            return Err(BotError::AlreadyExists(id.to_string()));
        }

        let modlist = Modlist::new(id, name, owner_id, role_id);
        let mut next = guard.clone();
        next.push(modlist.clone());

        self.persist(&next).await?;
        *guard = next;
        Ok(modlist)
    }

    /// Removes `modlist`. A stale copy whose id has since been re-registered
    /// with other fields is `NotFound`.
    pub async fn remove(&self, modlist: &Modlist) -> Result<(), BotError> {
        let mut guard = self.modlists.write().await;
        let Some(index) = guard.iter().position(|m| m == modlist) else {
            return Err(BotError::NotFound(modlist.id.clone()));
        };

        let mut next = guard.clone();
        next.remove(index);

        self.persist(&next).await?;
        *guard = next;
        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> Option<Modlist> {
        let guard = self.modlists.read().await;
        guard.iter().find(|m| m.id == id).cloned()
    }

    /// Snapshot of every record in insertion order.
    pub async fn list(&self) -> Vec<Modlist> {
        self.modlists.read().await.clone()
    }

    async fn persist(&self, modlists: &[Modlist]) -> Result<(), BotError> {
        if let Err(e) = self.write_file(modlists).await {
            tracing::error!(
                path = %self.path.display(),
                error = %e,
                "Failed to persist modlist registry, mutation discarded"
            );
            return Err(BotError::PersistenceFailure(e.to_string()));
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    /// Writes a sibling temp file and renames it over the registry.
    async fn write_file(&self, modlists: &[Modlist]) -> io::Result<()> {
        let content = serde_json::to_string_pretty(modlists)?;

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).await?;

        let tmp_path = self.tmp_path();
        if let Err(e) = self.replace_with(&tmp_path, content.as_bytes()).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e);
        }

        // The new file is already in place; a failed directory flush only weakens durability.
        if let Err(e) = sync_dir(&parent).await {
            tracing::warn!(dir = %parent.display(), error = %e, "Failed to sync registry directory");
        }
        Ok(())
    }

    async fn replace_with(&self, tmp_path: &Path, content: &[u8]) -> io::Result<()> {
        let mut file = fs::File::create(tmp_path).await?;
        file.write_all(content).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(tmp_path, &self.path).await
    }
}

/// Flushes the directory entry so the rename survives a crash.
#[cfg(unix)]
async fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
